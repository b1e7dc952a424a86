// src/errors.rs

//! Crate-wide error type.
//!
//! Every failure the resolution can hit is one of these variants. Nothing
//! here is partial: a config or pattern error aborts the run before any
//! pipeline document is produced.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonorepoDiffError {
    /// The raw plugin configuration is not valid structured data.
    #[error("failed to parse plugin configuration: {0}")]
    ConfigParse(String),

    /// The configuration parsed, but one of its fields has the wrong shape.
    #[error("invalid plugin configuration at `{field}`: {reason}")]
    ConfigInvalid { field: String, reason: String },

    /// No entry in the plugin list refers to this plugin.
    #[error("could not initialize plugin: no configuration entry for `{0}`")]
    PluginNotFound(String),

    #[error("invalid path pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// An external process could not be started at all.
    #[error("failed to execute `{command}`: {source}")]
    Execution {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// An external process ran but reported failure.
    #[error("command `{command}` exited with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pipeline serialization error: {0}")]
    Serialize(#[from] serde_yaml_ng::Error),
}

impl MonorepoDiffError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        MonorepoDiffError::ConfigInvalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MonorepoDiffError>;
