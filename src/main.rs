// src/main.rs

use monorepo_diff::config::initialize_plugin;
use monorepo_diff::env::ProcessEnv;
use monorepo_diff::errors::MonorepoDiffError;
use monorepo_diff::{cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("monorepo-diff error: {err:?}");
        std::process::exit(exit_code(&err));
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    let plugin = initialize_plugin(&args.plugins, &ProcessEnv)?;
    logging::init_logging(args.log_level, &plugin.log_level)?;
    run(&args, &plugin, &ProcessEnv).await
}

/// A failed upload exits with the agent's own status.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<MonorepoDiffError>() {
        Some(MonorepoDiffError::CommandFailed { status, .. }) if *status > 0 => *status,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_upload_exits_with_agent_status() {
        let err = anyhow::Error::from(MonorepoDiffError::CommandFailed {
            command: "buildkite-agent pipeline upload pipeline.yml".into(),
            status: 3,
            stderr: "agent exploded\n".into(),
        });
        assert_eq!(exit_code(&err), 3);
    }

    #[test]
    fn other_failures_exit_with_one() {
        let signalled = anyhow::Error::from(MonorepoDiffError::CommandFailed {
            command: "buildkite-agent".into(),
            status: -1,
            stderr: String::new(),
        });
        assert_eq!(exit_code(&signalled), 1);

        let not_found =
            anyhow::Error::from(MonorepoDiffError::PluginNotFound("monorepo-diff".into()));
        assert_eq!(exit_code(&not_found), 1);
    }
}
