// src/logging.rs

//! Logging setup for `monorepo-diff` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `MONOREPO_DIFF_LOG` environment variable (e.g. "info", "debug")
//! 3. the plugin's `log_level` setting
//! 4. default to `info`
//!
//! Logs are sent to STDERR so that `--dry-run` can print the pipeline on
//! stdout.

use anyhow::Result;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "MONOREPO_DIFF_LOG";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>, config_level: &str) -> Result<()> {
    let env_level = std::env::var(LOG_ENV_VAR).ok();
    let level = resolve_level(cli_level, env_level.as_deref(), config_level);

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Pick the effective level. Unparseable values fall through to the next source.
pub fn resolve_level(
    cli_level: Option<LogLevel>,
    env_level: Option<&str>,
    config_level: &str,
) -> tracing::Level {
    cli_level
        .map(level_from_log_level)
        .or_else(|| env_level.and_then(parse_level_str))
        .or_else(|| parse_level_str(config_level))
        .unwrap_or(tracing::Level::INFO)
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
