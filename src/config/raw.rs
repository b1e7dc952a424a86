// src/config/raw.rs

//! Loosely-typed view of the plugin configuration.
//!
//! This is the first of two normalization phases. Fields whose shape varies
//! (`path` as string or list, `env` as list, `notify` entries, `default`)
//! are captured as plain [`serde_json::Value`]s and classified later in
//! [`crate::config::normalize`]. Everything else is typed here, so a value of
//! the wrong JSON type fails at this stage as a parse error.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::config::model::{DEFAULT_DIFF_COMMAND, DEFAULT_LOG_LEVEL};

#[derive(Debug, Clone, Deserialize)]
pub struct RawPlugin {
    #[serde(default = "default_diff")]
    pub diff: String,

    #[serde(default)]
    pub wait: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_interpolation")]
    pub interpolation: bool,

    #[serde(default)]
    pub hooks: Vec<RawHook>,

    #[serde(default)]
    pub watch: Vec<RawWatch>,

    #[serde(default)]
    pub env: Option<Value>,

    #[serde(default)]
    pub notify: Vec<Value>,
}

fn default_diff() -> String {
    DEFAULT_DIFF_COMMAND.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_interpolation() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHook {
    pub command: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawWatch {
    #[serde(default)]
    pub path: Option<Value>,

    #[serde(default)]
    pub skip_path: Option<Value>,

    /// Step definition; decoded into [`RawStep`] once we know whether
    /// `default` replaces it.
    #[serde(default)]
    pub config: Option<Value>,

    #[serde(default)]
    pub default: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStep {
    #[serde(default)]
    pub group: Option<String>,

    #[serde(default)]
    pub trigger: Option<String>,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub build: Option<RawBuild>,

    #[serde(default)]
    pub command: Option<Value>,

    #[serde(default)]
    pub commands: Option<Value>,

    #[serde(default)]
    pub agents: Option<BTreeMap<String, Value>>,

    #[serde(default)]
    pub artifacts: Option<Vec<String>>,

    #[serde(default)]
    pub env: Option<Value>,

    #[serde(default, rename = "async")]
    pub is_async: bool,

    #[serde(default)]
    pub soft_fail: Option<Value>,

    #[serde(default)]
    pub notify: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBuild {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub branch: Option<String>,

    #[serde(default)]
    pub commit: Option<String>,

    #[serde(default)]
    pub env: Option<Value>,

    #[serde(default)]
    pub meta_data: Option<BTreeMap<String, Value>>,
}
