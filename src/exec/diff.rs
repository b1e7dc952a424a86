// src/exec/diff.rs

use tracing::{info, warn};

use crate::diff::parse_diff_output;
use crate::env::EnvProvider;
use crate::errors::Result;
use crate::exec::command::run_shell;

pub const DEFAULT_SHELL: &str = "bash";

/// Run the configured diff command and return the changed files.
///
/// The command runs through `$SHELL -c` (`bash` if unset). A command that
/// runs but exits non-zero yields no changed files; only failing to start
/// the shell is an error.
pub async fn changed_files(diff_command: &str, env: &dyn EnvProvider) -> Result<Vec<String>> {
    let shell = env.var_or("SHELL", DEFAULT_SHELL);
    info!(command = %diff_command, %shell, "running diff command");

    let output = run_shell(&shell, diff_command).await?;
    if !output.success {
        warn!(
            exit_code = output.status,
            stderr = %output.stderr.trim_end(),
            "diff command failed, treating as no changes"
        );
        return Ok(Vec::new());
    }

    let files = parse_diff_output(&output.stdout);
    info!(count = files.len(), ?files, "changed files");
    Ok(files)
}
