// src/exec/mod.rs

//! Process boundary.
//!
//! Everything that shells out lives here, on top of `tokio::process::Command`:
//!
//! - [`command`] runs a process and captures its output.
//! - [`diff`] runs the configured diff command and parses the changed files.
//! - [`upload`] writes the generated pipeline to a temp file and hands it to
//!   `buildkite-agent pipeline upload`.

pub mod command;
pub mod diff;
pub mod upload;

pub use command::{run_command, run_shell, CommandOutput};
pub use diff::changed_files;
pub use upload::{plan_upload, upload_pipeline, write_pipeline, UploadCommand};
