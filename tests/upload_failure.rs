// Runs in its own test binary: it puts a fake `buildkite-agent` first on PATH.
#![cfg(unix)]

mod common;

use std::error::Error;
use std::fs;
use std::os::unix::fs::PermissionsExt;

use monorepo_diff::errors::MonorepoDiffError;
use monorepo_diff::exec::upload_pipeline;
use monorepo_diff::pipeline::generate_pipeline;

use common::{init_tracing, PluginConfigBuilder};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn failed_agent_upload_keeps_status_and_stderr() -> TestResult {
    init_tracing();

    let bin = tempfile::tempdir()?;
    let agent = bin.path().join("buildkite-agent");
    fs::write(&agent, "#!/bin/sh\necho 'agent exploded' >&2\nexit 3\n")?;
    fs::set_permissions(&agent, fs::Permissions::from_mode(0o755))?;

    let path = std::env::var("PATH").unwrap_or_default();
    // SAFETY: the only test in this binary, so no other thread reads the environment.
    unsafe {
        std::env::set_var("PATH", format!("{}:{path}", bin.path().display()));
    }

    let plugin = PluginConfigBuilder::new().hook("make clean").build();
    let pipeline = generate_pipeline(&[], &plugin)?;

    let err = upload_pipeline(&pipeline, true).await.unwrap_err();
    match err {
        MonorepoDiffError::CommandFailed {
            command,
            status,
            stderr,
        } => {
            assert_eq!(status, 3);
            assert_eq!(stderr, "agent exploded\n");
            assert!(command.starts_with("buildkite-agent pipeline upload "));
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
    Ok(())
}
