// src/config/model.rs

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Name every plugin reference is matched against.
pub const PLUGIN_NAME: &str = "monorepo-diff";

/// Diff command used when the config does not set `diff`.
pub const DEFAULT_DIFF_COMMAND: &str = "git diff --name-only HEAD~1";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Normalized plugin configuration.
///
/// Built once by [`crate::config::Normalizer`] and never mutated afterwards.
/// List order is the order of the raw input; it decides emission order in
/// the generated pipeline, never whether something matches.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginConfig {
    /// Shell command whose stdout lists the changed files.
    pub diff: String,

    /// Emit a `wait` step between triggered steps and hooks.
    pub wait: bool,

    pub log_level: String,

    /// When false, the upload is told not to interpolate variables.
    pub interpolation: bool,

    pub hooks: Vec<HookCommand>,
    pub watch: Vec<WatchRule>,

    /// Top-level env, merged into every watch rule's step.
    pub env: BTreeMap<String, String>,

    /// Pipeline-level notifications.
    pub notify: Vec<Notification>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            diff: DEFAULT_DIFF_COMMAND.to_string(),
            wait: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            interpolation: true,
            hooks: Vec::new(),
            watch: Vec::new(),
            env: BTreeMap::new(),
            notify: Vec::new(),
        }
    }
}

/// A command appended to every generated pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookCommand {
    pub command: String,
}

/// One `watch` entry: path patterns mapped to a step.
///
/// A default rule has no path patterns; it only fires when no other rule
/// matched. A non-default rule with no path patterns never fires.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WatchRule {
    pub paths: Vec<String>,
    pub skip_paths: Vec<String>,
    pub step: StepSpec,
    pub is_default: bool,
}

/// Step definition attached to a watch rule.
///
/// Trigger-style (`trigger` + `build`) and command-style (`command` /
/// `commands`) fields can technically coexist; nothing rejects that.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepSpec {
    pub group: Option<String>,
    pub trigger: Option<String>,
    pub label: Option<String>,
    pub build: BuildSpec,
    pub command: Option<CommandSpec>,
    pub commands: Option<CommandSpec>,
    pub agents: BTreeMap<String, String>,
    pub artifacts: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub is_async: bool,
    /// `true`/`false` or a list of `{exit_status: ..}` objects, kept verbatim.
    pub soft_fail: Option<Value>,
    pub notify: Vec<Notification>,
}

impl StepSpec {
    pub fn is_trigger(&self) -> bool {
        self.trigger.is_some()
    }

    pub fn is_command(&self) -> bool {
        self.command.is_some() || self.commands.is_some()
    }
}

/// Build settings for a triggered pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BuildSpec {
    pub message: Option<String>,
    pub branch: Option<String>,
    pub commit: Option<String>,
    pub env: BTreeMap<String, String>,
    pub meta_data: BTreeMap<String, Value>,
}

impl BuildSpec {
    pub fn is_empty(&self) -> bool {
        self.message.is_none()
            && self.branch.is_none()
            && self.commit.is_none()
            && self.env.is_empty()
            && self.meta_data.is_empty()
    }
}

/// `command` / `commands` accept a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CommandSpec {
    Single(String),
    List(Vec<String>),
}

/// Where a notification is delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyTarget {
    Email(String),
    Basecamp(String),
    Webhook(String),
    PagerDuty(String),
    Slack(String),
    GithubStatus { context: String },
}

impl NotifyTarget {
    /// Pipeline schema key for this target.
    pub fn key(&self) -> &'static str {
        match self {
            NotifyTarget::Email(_) => "email",
            NotifyTarget::Basecamp(_) => "basecamp_campfire",
            NotifyTarget::Webhook(_) => "webhook",
            NotifyTarget::PagerDuty(_) => "pagerduty_change_event",
            NotifyTarget::Slack(_) => "slack",
            NotifyTarget::GithubStatus { .. } => "github_commit_status",
        }
    }
}

/// A single notification with an optional `if` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub target: NotifyTarget,
    pub condition: Option<String>,
}

impl Notification {
    pub fn new(target: NotifyTarget) -> Self {
        Self {
            target,
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }
}
