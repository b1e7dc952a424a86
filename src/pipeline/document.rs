// src/pipeline/document.rs

//! Output schema of the generated pipeline.
//!
//! These are borrowed views over the normalized config; field order here is
//! key order in the emitted YAML. Empty and default-valued fields are left
//! out.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::config::model::{BuildSpec, CommandSpec, Notification, NotifyTarget, StepSpec};

#[derive(Debug, serde::Serialize)]
pub struct PipelineDocument<'a> {
    #[serde(skip_serializing_if = "no_items")]
    pub notify: &'a [Notification],

    /// Always present, even when empty.
    pub steps: Vec<PipelineStep<'a>>,
}

#[derive(Debug, serde::Serialize)]
#[serde(untagged)]
pub enum PipelineStep<'a> {
    Group(GroupStep<'a>),
    Step(StepView<'a>),
    Wait(WaitStep),
    Hook(HookStep<'a>),
}

/// A step wrapped in its `group`.
#[derive(Debug, serde::Serialize)]
pub struct GroupStep<'a> {
    pub group: &'a str,
    pub steps: Vec<StepView<'a>>,
}

/// Renders as `wait: null`.
#[derive(Debug, Default, serde::Serialize)]
pub struct WaitStep {
    pub wait: (),
}

#[derive(Debug, serde::Serialize)]
pub struct HookStep<'a> {
    pub command: &'a str,
}

#[derive(Debug, serde::Serialize)]
pub struct StepView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildView<'a>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<&'a CommandSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands: Option<&'a CommandSpec>,

    #[serde(skip_serializing_if = "no_entries")]
    pub agents: &'a BTreeMap<String, String>,

    #[serde(skip_serializing_if = "no_items")]
    pub artifacts: &'a [String],

    #[serde(skip_serializing_if = "no_entries")]
    pub env: &'a BTreeMap<String, String>,

    #[serde(rename = "async", skip_serializing_if = "is_false")]
    pub is_async: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub soft_fail: Option<&'a Value>,

    #[serde(skip_serializing_if = "no_items")]
    pub notify: &'a [Notification],
}

impl<'a> From<&'a StepSpec> for StepView<'a> {
    fn from(step: &'a StepSpec) -> Self {
        Self {
            trigger: step.trigger.as_deref(),
            label: step.label.as_deref(),
            build: (!step.build.is_empty()).then(|| BuildView::from(&step.build)),
            command: step.command.as_ref(),
            commands: step.commands.as_ref(),
            agents: &step.agents,
            artifacts: &step.artifacts,
            env: &step.env,
            is_async: step.is_async,
            soft_fail: step.soft_fail.as_ref().filter(|v| soft_fail_is_set(v)),
            notify: &step.notify,
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct BuildView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<&'a str>,

    #[serde(skip_serializing_if = "no_entries")]
    pub env: &'a BTreeMap<String, String>,

    #[serde(skip_serializing_if = "no_entries")]
    pub meta_data: &'a BTreeMap<String, Value>,
}

impl<'a> From<&'a BuildSpec> for BuildView<'a> {
    fn from(build: &'a BuildSpec) -> Self {
        Self {
            message: build.message.as_deref(),
            branch: build.branch.as_deref(),
            commit: build.commit.as_deref(),
            env: &build.env,
            meta_data: &build.meta_data,
        }
    }
}

/// `soft_fail: false` and empty lists are the default; don't emit them.
fn soft_fail_is_set(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn no_items<T>(items: &&[T]) -> bool {
    items.is_empty()
}

fn no_entries<K, V>(map: &&BTreeMap<K, V>) -> bool {
    map.is_empty()
}

/// `{ <target key>: <target>, if: <condition> }`
impl Serialize for Notification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        struct GithubStatus<'a> {
            context: &'a str,
        }

        let len = if self.condition.is_some() { 2 } else { 1 };
        let mut map = serializer.serialize_map(Some(len))?;

        let key = self.target.key();
        match &self.target {
            NotifyTarget::Email(v)
            | NotifyTarget::Basecamp(v)
            | NotifyTarget::Webhook(v)
            | NotifyTarget::PagerDuty(v)
            | NotifyTarget::Slack(v) => map.serialize_entry(key, v)?,
            NotifyTarget::GithubStatus { context } => {
                map.serialize_entry(key, &GithubStatus { context: context.as_str() })?
            }
        }

        if let Some(condition) = &self.condition {
            map.serialize_entry("if", condition)?;
        }

        map.end()
    }
}
