// src/config/loader.rs

use serde_json::{Map, Value};
use tracing::debug;

use crate::config::model::{PluginConfig, PLUGIN_NAME};
use crate::config::normalize::Normalizer;
use crate::config::raw::RawPlugin;
use crate::env::EnvProvider;
use crate::errors::{MonorepoDiffError, Result};

/// Find this plugin's entry in the CI plugin list and normalize it.
///
/// `data` is a JSON array of single-key objects, keyed by plugin reference:
///
/// ```json
/// [
///   { "github.com/example/other-plugin#v1": { ... } },
///   { "monorepo-diff#v1.2": { "watch": [ ... ] } }
/// ]
/// ```
///
/// Only the first entry whose reference points at this plugin is decoded;
/// the others are skipped after looking at their key.
pub fn initialize_plugin(data: &str, env: &dyn EnvProvider) -> Result<PluginConfig> {
    debug!(%data, "parsing plugin config");

    let entries: Vec<Map<String, Value>> = serde_json::from_str(data).map_err(|e| {
        debug!(error = %e, "plugin list is not valid JSON");
        MonorepoDiffError::ConfigParse(e.to_string())
    })?;

    for entry in entries {
        for (reference, config) in entry {
            if !refers_to_plugin(&reference) {
                debug!(%reference, "skipping config for another plugin");
                continue;
            }

            debug!(%reference, "found plugin config");
            let config = if config.is_null() {
                Value::Object(Map::new())
            } else {
                config
            };
            let raw: RawPlugin = serde_json::from_value(config)
                .map_err(|e| MonorepoDiffError::ConfigParse(format!("{reference}: {e}")))?;

            return Normalizer::new(env).normalize(raw);
        }
    }

    Err(MonorepoDiffError::PluginNotFound(PLUGIN_NAME.to_string()))
}

/// True if `reference` names this plugin, in any of the accepted forms:
/// `monorepo-diff#v1`, `org/monorepo-diff-buildkite-plugin#sha`,
/// `github.com/org/monorepo-diff-buildkite-plugin`, or a full URL.
pub fn refers_to_plugin(reference: &str) -> bool {
    plugin_basename(reference).is_some_and(|name| name.starts_with(PLUGIN_NAME))
}

/// Last path segment of a plugin reference, without its `#ref` suffix.
///
/// Returns `None` for references that are not a valid URL or path, such as
/// one whose first segment contains a `:` without a `scheme://` prefix.
pub fn plugin_basename(reference: &str) -> Option<&str> {
    let without_ref = reference
        .split_once('#')
        .map_or(reference, |(head, _)| head);

    let path = match without_ref.split_once("://") {
        Some((scheme, rest)) => {
            if !is_valid_scheme(scheme) {
                return None;
            }
            rest
        }
        None => {
            let first_segment = without_ref.split('/').next().unwrap_or_default();
            if first_segment.contains(':') {
                return None;
            }
            without_ref
        }
    };

    path.rsplit('/').next()
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
