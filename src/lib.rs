// src/lib.rs

pub mod cli;
pub mod config;
pub mod diff;
pub mod env;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod pipeline;
pub mod watch;

use anyhow::Result;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::PluginConfig;
use crate::env::EnvProvider;
use crate::exec::{changed_files, upload_pipeline};
use crate::pipeline::{generate_pipeline, AssembledPipeline};
use crate::watch::steps_to_trigger;

/// Resolve the steps for `changed_files` and assemble the pipeline.
///
/// Pure: no processes, no filesystem.
pub fn resolve_pipeline<S: AsRef<str>>(
    plugin: &PluginConfig,
    changed_files: &[S],
) -> errors::Result<AssembledPipeline> {
    let steps = steps_to_trigger(changed_files, &plugin.watch)?;
    info!(count = steps.len(), "steps to trigger");
    generate_pipeline(&steps, plugin)
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - running the diff command (no changed files ends the run here)
/// - watch rule resolution
/// - pipeline assembly
/// - upload, or printing the pipeline on `--dry-run`
pub async fn run(args: &CliArgs, plugin: &PluginConfig, env: &dyn EnvProvider) -> Result<()> {
    let changed = changed_files(&plugin.diff, env).await?;
    if changed.is_empty() {
        info!("no changes detected, skipping pipeline upload");
        return Ok(());
    }

    let pipeline = resolve_pipeline(plugin, &changed)?;

    if args.dry_run {
        print!("{}", pipeline.yaml);
        info!(has_steps = pipeline.has_steps, "dry-run complete (no upload)");
        return Ok(());
    }

    upload_pipeline(&pipeline, plugin.interpolation).await?;
    Ok(())
}
