#![allow(dead_code)]

use std::collections::BTreeMap;

use monorepo_diff::config::{
    BuildSpec, CommandSpec, HookCommand, Notification, PluginConfig, StepSpec, WatchRule,
};

/// Builder for `PluginConfig` to simplify test setup.
pub struct PluginConfigBuilder {
    config: PluginConfig,
}

impl PluginConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: PluginConfig::default(),
        }
    }

    pub fn diff(mut self, command: &str) -> Self {
        self.config.diff = command.to_string();
        self
    }

    pub fn wait(mut self, wait: bool) -> Self {
        self.config.wait = wait;
        self
    }

    pub fn interpolation(mut self, interpolation: bool) -> Self {
        self.config.interpolation = interpolation;
        self
    }

    pub fn hook(mut self, command: &str) -> Self {
        self.config.hooks.push(HookCommand {
            command: command.to_string(),
        });
        self
    }

    pub fn watch(mut self, rule: WatchRule) -> Self {
        self.config.watch.push(rule);
        self
    }

    pub fn notify(mut self, notification: Notification) -> Self {
        self.config.notify.push(notification);
        self
    }

    pub fn build(self) -> PluginConfig {
        self.config
    }
}

impl Default for PluginConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `WatchRule`.
pub struct WatchRuleBuilder {
    rule: WatchRule,
}

impl WatchRuleBuilder {
    /// A rule firing on `paths`.
    pub fn new(paths: &[&str]) -> Self {
        Self {
            rule: WatchRule {
                paths: paths.iter().map(|p| p.to_string()).collect(),
                ..WatchRule::default()
            },
        }
    }

    /// A default rule: no paths, fires only when nothing else did.
    pub fn default_rule() -> Self {
        Self {
            rule: WatchRule {
                is_default: true,
                ..WatchRule::default()
            },
        }
    }

    pub fn skip(mut self, pattern: &str) -> Self {
        self.rule.skip_paths.push(pattern.to_string());
        self
    }

    pub fn step(mut self, step: StepSpec) -> Self {
        self.rule.step = step;
        self
    }

    pub fn build(self) -> WatchRule {
        self.rule
    }
}

/// Builder for `StepSpec`.
pub struct StepSpecBuilder {
    step: StepSpec,
}

impl StepSpecBuilder {
    pub fn trigger(pipeline: &str) -> Self {
        Self {
            step: StepSpec {
                trigger: Some(pipeline.to_string()),
                ..StepSpec::default()
            },
        }
    }

    pub fn command(command: &str) -> Self {
        Self {
            step: StepSpec {
                command: Some(CommandSpec::Single(command.to_string())),
                ..StepSpec::default()
            },
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.step.label = Some(label.to_string());
        self
    }

    pub fn group(mut self, group: &str) -> Self {
        self.step.group = Some(group.to_string());
        self
    }

    pub fn message(mut self, message: &str) -> Self {
        self.step.build.message = Some(message.to_string());
        self
    }

    pub fn build_settings(mut self, build: BuildSpec) -> Self {
        self.step.build = build;
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.step.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn agent(mut self, key: &str, value: &str) -> Self {
        self.step.agents.insert(key.to_string(), value.to_string());
        self
    }

    pub fn artifact(mut self, path: &str) -> Self {
        self.step.artifacts.push(path.to_string());
        self
    }

    pub fn is_async(mut self, is_async: bool) -> Self {
        self.step.is_async = is_async;
        self
    }

    pub fn notify(mut self, notification: Notification) -> Self {
        self.step.notify.push(notification);
        self
    }

    pub fn build(self) -> StepSpec {
        self.step
    }
}

/// `KEY=VALUE` pairs into an env map.
pub fn env_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
