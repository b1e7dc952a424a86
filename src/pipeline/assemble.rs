// src/pipeline/assemble.rs

use tracing::debug;

use crate::config::model::{PluginConfig, StepSpec};
use crate::errors::Result;
use crate::pipeline::document::{
    GroupStep, HookStep, PipelineDocument, PipelineStep, StepView, WaitStep,
};

/// A serialized pipeline, ready to be written out and uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPipeline {
    pub yaml: String,
    /// False when the `steps` list is empty, i.e. there is nothing to run.
    pub has_steps: bool,
}

/// Lay out the pipeline document.
///
/// Order is fixed: pipeline notifications first, then the resolved steps in
/// the order given, then a `wait` if configured, then one command per hook.
pub fn build_document<'a>(steps: &'a [StepSpec], plugin: &'a PluginConfig) -> PipelineDocument<'a> {
    let mut entries: Vec<PipelineStep<'a>> = steps.iter().map(step_entry).collect();

    if plugin.wait {
        entries.push(PipelineStep::Wait(WaitStep::default()));
    }

    entries.extend(plugin.hooks.iter().map(|hook| {
        PipelineStep::Hook(HookStep {
            command: &hook.command,
        })
    }));

    PipelineDocument {
        notify: &plugin.notify,
        steps: entries,
    }
}

/// Build and serialize the pipeline for `steps`.
pub fn generate_pipeline(steps: &[StepSpec], plugin: &PluginConfig) -> Result<AssembledPipeline> {
    let document = build_document(steps, plugin);
    let has_steps = !document.steps.is_empty();
    let yaml = serde_yaml_ng::to_string(&document)?;

    debug!(has_steps, "generated pipeline:\n{yaml}");

    Ok(AssembledPipeline { yaml, has_steps })
}

fn step_entry(step: &StepSpec) -> PipelineStep<'_> {
    match step.group.as_deref() {
        Some(group) => PipelineStep::Group(GroupStep {
            group,
            steps: vec![StepView::from(step)],
        }),
        None => PipelineStep::Step(StepView::from(step)),
    }
}

#[cfg(test)]
mod tests {
    use serde_yaml_ng::Value;

    use super::*;
    use crate::config::model::{BuildSpec, CommandSpec, HookCommand, Notification, NotifyTarget};

    fn hooks(commands: &[&str]) -> Vec<HookCommand> {
        commands
            .iter()
            .map(|c| HookCommand {
                command: c.to_string(),
            })
            .collect()
    }

    #[test]
    fn no_steps_no_hooks_still_declares_steps() {
        let plugin = PluginConfig::default();
        let pipeline = generate_pipeline(&[], &plugin).unwrap();

        assert_eq!(pipeline.yaml, "steps: []\n");
        assert!(!pipeline.has_steps);
    }

    #[test]
    fn wait_and_hooks_without_steps() {
        let plugin = PluginConfig {
            wait: true,
            hooks: hooks(&["cat ./file.txt", "make clean"]),
            ..PluginConfig::default()
        };
        let pipeline = generate_pipeline(&[], &plugin).unwrap();

        assert_eq!(
            pipeline.yaml,
            "steps:\n- wait: null\n- command: cat ./file.txt\n- command: make clean\n"
        );
        assert!(pipeline.has_steps);
    }

    #[test]
    fn steps_come_before_wait_and_hooks() {
        let steps = vec![StepSpec {
            trigger: Some("foo-service-pipeline".into()),
            build: BuildSpec {
                message: Some("build message".into()),
                ..BuildSpec::default()
            },
            ..StepSpec::default()
        }];
        let plugin = PluginConfig {
            wait: true,
            hooks: hooks(&["cat ./file.txt"]),
            notify: vec![Notification::new(NotifyTarget::Email("foo@gmail.com".into()))],
            ..PluginConfig::default()
        };

        let pipeline = generate_pipeline(&steps, &plugin).unwrap();
        assert_eq!(
            pipeline.yaml,
            "notify:\n- email: foo@gmail.com\nsteps:\n- trigger: foo-service-pipeline\n  build:\n    message: build message\n- wait: null\n- command: cat ./file.txt\n"
        );
    }

    #[test]
    fn grouped_step_is_nested_and_loses_group_key() {
        let steps = vec![StepSpec {
            group: Some("my group".into()),
            command: Some(CommandSpec::List(vec!["make".into(), "make test".into()])),
            ..StepSpec::default()
        }];
        let pipeline = generate_pipeline(&steps, &PluginConfig::default()).unwrap();

        let doc: Value = serde_yaml_ng::from_str(&pipeline.yaml).unwrap();
        let group = &doc["steps"][0];
        assert_eq!(group["group"], Value::from("my group"));
        assert_eq!(group["steps"][0]["command"][1], Value::from("make test"));
        assert!(group["steps"][0].get("group").is_none());
    }

    #[test]
    fn default_valued_fields_are_omitted() {
        let steps = vec![StepSpec {
            command: Some(CommandSpec::Single("make".into())),
            soft_fail: Some(serde_json::Value::Bool(false)),
            ..StepSpec::default()
        }];
        let pipeline = generate_pipeline(&steps, &PluginConfig::default()).unwrap();

        assert_eq!(pipeline.yaml, "steps:\n- command: make\n");
    }
}
