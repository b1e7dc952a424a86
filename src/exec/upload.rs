// src/exec/upload.rs

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::errors::{MonorepoDiffError, Result};
use crate::exec::command::run_command;
use crate::pipeline::AssembledPipeline;

pub const AGENT_COMMAND: &str = "buildkite-agent";

/// The agent invocation that uploads a pipeline file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCommand {
    pub command: String,
    pub args: Vec<String>,
}

impl UploadCommand {
    pub fn display(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Decide whether and how to upload the pipeline at `path`.
///
/// Returns `None` when the pipeline has no steps.
pub fn plan_upload(path: &Path, has_steps: bool, interpolation: bool) -> Option<UploadCommand> {
    if !has_steps {
        return None;
    }

    let mut args = vec![
        "pipeline".to_string(),
        "upload".to_string(),
        path.display().to_string(),
    ];
    if !interpolation {
        args.push("--no-interpolation".to_string());
    }

    Some(UploadCommand {
        command: AGENT_COMMAND.to_string(),
        args,
    })
}

/// Write `yaml` to a fresh temp file. The file is removed when the handle drops.
pub fn write_pipeline(yaml: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("pipeline-")
        .suffix(".yml")
        .tempfile()?;
    file.write_all(yaml.as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// Upload `pipeline` through the agent.
///
/// Returns the command that was run, or `None` if there was nothing to
/// upload. A non-zero agent exit is an error carrying its status and stderr.
pub async fn upload_pipeline(
    pipeline: &AssembledPipeline,
    interpolation: bool,
) -> Result<Option<UploadCommand>> {
    let file = write_pipeline(&pipeline.yaml)?;

    let Some(upload) = plan_upload(file.path(), pipeline.has_steps, interpolation) else {
        info!("no steps to upload");
        return Ok(None);
    };

    let output = run_command(&upload.command, &upload.args).await?;
    if !output.success {
        warn!(exit_code = output.status, "pipeline upload failed");
        return Err(MonorepoDiffError::CommandFailed {
            command: upload.display(),
            status: output.status,
            stderr: output.stderr,
        });
    }

    info!(command = %upload.display(), "pipeline uploaded");
    Ok(Some(upload))
}
