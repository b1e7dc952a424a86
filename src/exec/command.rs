// src/exec/command.rs

use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{MonorepoDiffError, Result};

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or -1 if the process was killed by a signal.
    pub status: i32,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Run `program` with `args` to completion and capture its output.
///
/// Only a failure to start the process is an error here; a non-zero exit is
/// reported through [`CommandOutput`] for the caller to judge.
pub async fn run_command(program: &str, args: &[String]) -> Result<CommandOutput> {
    let cmd_line = display_command(program, args);
    info!(command = %cmd_line, "starting process");

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| MonorepoDiffError::Execution {
            command: cmd_line.clone(),
            source,
        })?;

    let status = output.status.code().unwrap_or(-1);
    let result = CommandOutput {
        status,
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    debug!(
        command = %cmd_line,
        exit_code = status,
        success = result.success,
        stderr = %result.stderr.trim_end(),
        "process exited"
    );

    Ok(result)
}

/// Run a command line through `shell -c`.
///
/// Newlines are folded into spaces first so that a multi-line YAML value
/// still forms a single command line.
pub async fn run_shell(shell: &str, line: &str) -> Result<CommandOutput> {
    run_command(shell, &["-c".to_string(), shell_line(line)]).await
}

pub fn shell_line(line: &str) -> String {
    line.replace(['\r', '\n'], " ")
}

fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
