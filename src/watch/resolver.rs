// src/watch/resolver.rs

//! Decide which watch rules fire for a set of changed files.

use tracing::{debug, info};

use crate::config::model::{StepSpec, WatchRule};
use crate::errors::Result;
use crate::watch::patterns::RuleProfile;

/// Steps to trigger for `changed_files`, in rule order.
///
/// Every non-default rule with at least one matching, non-skipped file
/// contributes its step once. Only when none of them fired do the default
/// rules contribute, all of them, in rule order.
///
/// All patterns are compiled up front; one invalid pattern fails the whole
/// resolution.
pub fn steps_to_trigger<S: AsRef<str>>(
    changed_files: &[S],
    rules: &[WatchRule],
) -> Result<Vec<StepSpec>> {
    let profiles = rules
        .iter()
        .map(RuleProfile::compile)
        .collect::<Result<Vec<_>>>()?;

    let mut steps: Vec<StepSpec> = rules
        .iter()
        .zip(&profiles)
        .filter(|(_, profile)| !profile.is_default())
        .filter(|(rule, profile)| {
            let fired = profile.fires_for(changed_files);
            debug!(paths = ?rule.paths, skip = ?rule.skip_paths, fired, "evaluated watch rule");
            fired
        })
        .map(|(rule, _)| rule.step.clone())
        .collect();

    if steps.is_empty() {
        steps = rules
            .iter()
            .zip(&profiles)
            .filter(|(_, profile)| profile.is_default())
            .map(|(rule, _)| rule.step.clone())
            .collect();

        if !steps.is_empty() {
            info!(count = steps.len(), "no watch rule matched, using default rules");
        }
    }

    info!(
        changed = changed_files.len(),
        steps = steps.len(),
        "resolved steps to trigger"
    );
    Ok(steps)
}
