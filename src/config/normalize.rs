// src/config/normalize.rs

//! Second normalization phase: raw config → strict [`PluginConfig`].
//!
//! The normalizer resolves every shape ambiguity left by [`crate::config::raw`]:
//! - `path` / `skip_path` as a string or a list of strings,
//! - `env` as a list of `KEY=VALUE` / bare `KEY` tokens,
//! - `notify` entries (see [`crate::config::notify`]),
//! - `default` watch entries and their optional nested `config`,
//! - build message/branch/commit fallbacks for trigger steps,
//! - propagation of the top-level env into each step.
//!
//! It is a pure function of its input and the injected [`EnvProvider`], so
//! normalizing the same raw config twice gives the same result.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::config::model::{BuildSpec, CommandSpec, HookCommand, PluginConfig, StepSpec, WatchRule};
use crate::config::notify::{classify_notifications, NotifyLevel};
use crate::config::raw::{RawBuild, RawPlugin, RawStep, RawWatch};
use crate::env::EnvProvider;
use crate::errors::{MonorepoDiffError, Result};

/// CI variables used as build fallbacks for trigger steps.
pub const MESSAGE_VAR: &str = "BUILDKITE_MESSAGE";
pub const BRANCH_VAR: &str = "BUILDKITE_BRANCH";
pub const COMMIT_VAR: &str = "BUILDKITE_COMMIT";

pub struct Normalizer<'a> {
    env: &'a dyn EnvProvider,
}

impl<'a> Normalizer<'a> {
    pub fn new(env: &'a dyn EnvProvider) -> Self {
        Self { env }
    }

    pub fn normalize(&self, raw: RawPlugin) -> Result<PluginConfig> {
        let env = self.parse_env("env", raw.env.as_ref())?;
        let notify = classify_notifications(&raw.notify, NotifyLevel::Plugin);

        let hooks = raw
            .hooks
            .into_iter()
            .map(|h| HookCommand { command: h.command })
            .collect();

        let watch = raw
            .watch
            .into_iter()
            .enumerate()
            .map(|(index, w)| self.normalize_watch(index, w, &env))
            .collect::<Result<Vec<_>>>()?;

        Ok(PluginConfig {
            diff: raw.diff,
            wait: raw.wait,
            log_level: raw.log_level,
            interpolation: raw.interpolation,
            hooks,
            watch,
            env,
            notify,
        })
    }

    fn normalize_watch(
        &self,
        index: usize,
        raw: RawWatch,
        plugin_env: &BTreeMap<String, String>,
    ) -> Result<WatchRule> {
        let field = format!("watch[{index}]");

        let (paths, step_source, is_default) = match raw.default {
            Some(default) => {
                let source = default_step_source(&field, default, raw.config)?;
                (Vec::new(), source, true)
            }
            None => {
                let paths = string_list(&format!("{field}.path"), raw.path.as_ref())?;
                (paths, raw.config, false)
            }
        };

        let skip_paths = string_list(&format!("{field}.skip_path"), raw.skip_path.as_ref())?;
        let step = self.normalize_step(&format!("{field}.config"), step_source, plugin_env)?;

        debug!(%field, ?paths, ?skip_paths, is_default, ?step, "normalized watch rule");

        Ok(WatchRule {
            paths,
            skip_paths,
            step,
            is_default,
        })
    }

    fn normalize_step(
        &self,
        field: &str,
        source: Option<Value>,
        plugin_env: &BTreeMap<String, String>,
    ) -> Result<StepSpec> {
        let raw: RawStep = match source {
            None | Some(Value::Null) => RawStep::default(),
            Some(value) => serde_json::from_value(value)
                .map_err(|e| MonorepoDiffError::ConfigParse(format!("{field}: {e}")))?,
        };

        let build = self.normalize_build(field, raw.build.unwrap_or_default())?;

        let mut step = StepSpec {
            group: raw.group,
            trigger: raw.trigger,
            label: raw.label,
            build,
            command: command_spec(&format!("{field}.command"), raw.command)?,
            commands: command_spec(&format!("{field}.commands"), raw.commands)?,
            agents: agents(&format!("{field}.agents"), raw.agents.unwrap_or_default())?,
            artifacts: raw.artifacts.unwrap_or_default(),
            env: self.parse_env(&format!("{field}.env"), raw.env.as_ref())?,
            is_async: raw.is_async,
            soft_fail: raw.soft_fail.filter(|v| !v.is_null()),
            notify: classify_notifications(&raw.notify.unwrap_or_default(), NotifyLevel::Step),
        };

        if step.is_trigger() {
            self.fill_build_fallbacks(&mut step.build);
        }

        merge_plugin_env(&mut step, plugin_env);

        Ok(step)
    }

    fn normalize_build(&self, field: &str, raw: RawBuild) -> Result<BuildSpec> {
        Ok(BuildSpec {
            message: raw.message.filter(|s| !s.is_empty()),
            branch: raw.branch.filter(|s| !s.is_empty()),
            commit: raw.commit.filter(|s| !s.is_empty()),
            env: self.parse_env(&format!("{field}.build.env"), raw.env.as_ref())?,
            meta_data: raw.meta_data.unwrap_or_default(),
        })
    }

    /// Unset message/branch/commit fall back to the running build's values,
    /// escaped so the uploaded pipeline does not interpolate them again.
    fn fill_build_fallbacks(&self, build: &mut BuildSpec) {
        for (slot, var) in [
            (&mut build.message, MESSAGE_VAR),
            (&mut build.branch, BRANCH_VAR),
            (&mut build.commit, COMMIT_VAR),
        ] {
            if slot.is_none() {
                let value = escape_interpolation(&self.env.var_or(var, ""));
                if !value.is_empty() {
                    *slot = Some(value);
                }
            }
        }
    }

    /// Turn a raw env list into a map.
    ///
    /// `KEY=VALUE` splits at the first `=`, trimming both sides. A bare `KEY`
    /// reads the process environment (empty if unset).
    fn parse_env(&self, field: &str, raw: Option<&Value>) -> Result<BTreeMap<String, String>> {
        let entries = match raw {
            None | Some(Value::Null) => return Ok(BTreeMap::new()),
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                return Err(MonorepoDiffError::invalid(
                    field,
                    format!("expected a list of KEY=VALUE strings, got {}", kind_of(other)),
                ));
            }
        };

        let mut env = BTreeMap::new();
        for (i, entry) in entries.iter().enumerate() {
            let Some(token) = entry.as_str() else {
                return Err(MonorepoDiffError::invalid(
                    format!("{field}[{i}]"),
                    format!("expected a string, got {}", kind_of(entry)),
                ));
            };

            let (key, value) = match token.split_once('=') {
                Some((key, value)) => (key.trim(), value.trim().to_string()),
                None => {
                    let key = token.trim();
                    (key, self.env.var_or(key, ""))
                }
            };

            if key.is_empty() {
                debug!(%field, %token, "ignoring env entry with an empty key");
                continue;
            }
            env.insert(key.to_string(), value);
        }

        Ok(env)
    }
}

/// Pick the step definition of a `default` watch entry.
///
/// A non-empty `default` object is the step itself, unless it nests the step
/// under `config`. Any other `default` value (`true`, `{}`) keeps the
/// entry's own `config`.
fn default_step_source(
    field: &str,
    default: Value,
    config: Option<Value>,
) -> Result<Option<Value>> {
    match default {
        Value::Object(mut map) if !map.is_empty() => match map.remove("config") {
            Some(inner @ Value::Object(_)) => Ok(Some(inner)),
            Some(other) => Err(MonorepoDiffError::invalid(
                format!("{field}.default.config"),
                format!("expected an object, got {}", kind_of(&other)),
            )),
            None => Ok(Some(Value::Object(map))),
        },
        _ => Ok(config),
    }
}

/// Top-level env goes to the step env for command steps and to the build env
/// for trigger steps. Keys the rule already sets win.
fn merge_plugin_env(step: &mut StepSpec, plugin_env: &BTreeMap<String, String>) {
    let target = if step.is_command() {
        &mut step.env
    } else if step.is_trigger() {
        &mut step.build.env
    } else {
        return;
    };

    for (key, value) in plugin_env {
        target.entry(key.clone()).or_insert_with(|| value.clone());
    }
}

fn string_list(field: &str, raw: Option<&Value>) -> Result<Vec<String>> {
    match raw {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(vec![s.clone()]),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    MonorepoDiffError::invalid(
                        format!("{field}[{i}]"),
                        format!("expected a string, got {}", kind_of(item)),
                    )
                })
            })
            .collect(),
        Some(other) => Err(MonorepoDiffError::invalid(
            field,
            format!("expected a string or a list of strings, got {}", kind_of(other)),
        )),
    }
}

fn command_spec(field: &str, raw: Option<Value>) -> Result<Option<CommandSpec>> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(CommandSpec::Single(s))),
        Some(list @ Value::Array(_)) => {
            let commands = string_list(field, Some(&list))?;
            Ok(Some(CommandSpec::List(commands)))
        }
        Some(other) => Err(MonorepoDiffError::invalid(
            field,
            format!("expected a string or a list of strings, got {}", kind_of(&other)),
        )),
    }
}

fn agents(field: &str, raw: BTreeMap<String, Value>) -> Result<BTreeMap<String, String>> {
    raw.into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(MonorepoDiffError::invalid(
                        format!("{field}.{key}"),
                        format!("expected a scalar, got {}", kind_of(&other)),
                    ));
                }
            };
            Ok((key, value))
        })
        .collect()
}

pub fn escape_interpolation(s: &str) -> String {
    s.replace('$', "$$")
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
