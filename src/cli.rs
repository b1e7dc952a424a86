// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The agent hands plugin configuration to the hook through
//! `BUILDKITE_PLUGINS`, so that is where `--plugins` falls back to.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `monorepo-diff`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "monorepo-diff",
    version,
    about = "Trigger pipeline steps based on which files changed.",
    long_about = None
)]
pub struct CliArgs {
    /// Plugin configuration JSON, as the agent provides it.
    #[arg(
        long,
        env = "BUILDKITE_PLUGINS",
        value_name = "JSON",
        default_value = "",
        hide_env_values = true
    )]
    pub plugins: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MONOREPO_DIFF_LOG`, then the plugin's `log_level`, is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the generated pipeline to stdout instead of uploading it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse() {
        let args = CliArgs::try_parse_from([
            "monorepo-diff",
            "--plugins",
            "[]",
            "--log-level",
            "debug",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(args.plugins, "[]");
        assert_eq!(args.log_level, Some(LogLevel::Debug));
        assert!(args.dry_run);
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert!(CliArgs::try_parse_from(["monorepo-diff", "--log-level", "loud"]).is_err());
    }
}
