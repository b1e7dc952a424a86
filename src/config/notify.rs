// src/config/notify.rs

//! Classification of raw `notify` entries.
//!
//! Each entry is an object expected to carry one target key and optionally
//! an `if` condition. The first known key found, in the level's priority
//! order, decides the target; every other key is ignored. Entries with no
//! known key are dropped without error.

use serde_json::Value;
use tracing::debug;

use crate::config::model::{Notification, NotifyTarget};

/// Where a notify list sits in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    /// Top-level plugin `notify`, emitted at the pipeline level.
    Plugin,
    /// `notify` inside a step definition.
    Step,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetKind {
    Email,
    Basecamp,
    Webhook,
    PagerDuty,
    Slack,
    GithubStatus,
}

const PLUGIN_PRIORITY: &[TargetKind] = &[
    TargetKind::Email,
    TargetKind::Basecamp,
    TargetKind::Webhook,
    TargetKind::PagerDuty,
    TargetKind::Slack,
    TargetKind::GithubStatus,
];

// Email, webhook and PagerDuty are pipeline-level only.
const STEP_PRIORITY: &[TargetKind] = &[
    TargetKind::Basecamp,
    TargetKind::Slack,
    TargetKind::GithubStatus,
];

impl NotifyLevel {
    fn priority(self) -> &'static [TargetKind] {
        match self {
            NotifyLevel::Plugin => PLUGIN_PRIORITY,
            NotifyLevel::Step => STEP_PRIORITY,
        }
    }
}

/// Classify every entry of a raw notify list, keeping input order.
pub fn classify_notifications(raw: &[Value], level: NotifyLevel) -> Vec<Notification> {
    raw.iter()
        .filter_map(|entry| {
            let notification = classify(entry, level);
            if notification.is_none() {
                debug!(?level, %entry, "dropping notify entry with no recognised target");
            }
            notification
        })
        .collect()
}

fn classify(entry: &Value, level: NotifyLevel) -> Option<Notification> {
    let obj = entry.as_object()?;

    for kind in level.priority() {
        let target = match kind {
            TargetKind::Email => string_field(obj, "email").map(NotifyTarget::Email),
            TargetKind::Basecamp => {
                string_field(obj, "basecamp_campfire").map(NotifyTarget::Basecamp)
            }
            TargetKind::Webhook => string_field(obj, "webhook").map(NotifyTarget::Webhook),
            TargetKind::PagerDuty => {
                string_field(obj, "pagerduty_change_event").map(NotifyTarget::PagerDuty)
            }
            TargetKind::Slack => string_field(obj, "slack").map(NotifyTarget::Slack),
            TargetKind::GithubStatus => match obj.get("github_commit_status") {
                // A status object without a context is unusable; stop here
                // rather than falling through to another key.
                Some(Value::Object(status)) => {
                    let context = string_field(status, "context")?;
                    Some(NotifyTarget::GithubStatus { context })
                }
                _ => None,
            },
        };

        if let Some(target) = target {
            return Some(Notification {
                target,
                condition: string_field(obj, "if"),
            });
        }
    }

    None
}

fn string_field(obj: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn plugin_level_keeps_every_target_kind_in_order() {
        let raw = json!([
            { "email": "foo@gmail.com" },
            { "basecamp_campfire": "https://basecamp-url" },
            { "webhook": "https://webhook-url", "if": "build.state === 'failed'" },
            { "pagerduty_change_event": "636d22Yourc0418Key3b49eee3e8" },
            { "github_commit_status": { "context": "my-custom-status" } },
            { "slack": "@someuser" }
        ]);
        let got = classify_notifications(raw.as_array().unwrap(), NotifyLevel::Plugin);

        assert_eq!(
            got,
            vec![
                Notification::new(NotifyTarget::Email("foo@gmail.com".into())),
                Notification::new(NotifyTarget::Basecamp("https://basecamp-url".into())),
                Notification::new(NotifyTarget::Webhook("https://webhook-url".into()))
                    .with_condition("build.state === 'failed'"),
                Notification::new(NotifyTarget::PagerDuty(
                    "636d22Yourc0418Key3b49eee3e8".into()
                )),
                Notification::new(NotifyTarget::GithubStatus {
                    context: "my-custom-status".into()
                }),
                Notification::new(NotifyTarget::Slack("@someuser".into())),
            ]
        );
    }

    #[test]
    fn step_level_drops_plugin_only_targets() {
        let raw = json!([
            { "email": "foo@gmail.com" },
            { "webhook": "https://webhook-url" },
            { "pagerduty_change_event": "key" },
            { "slack": "@someuser", "if": "build.state === 'passed'" }
        ]);
        let got = classify_notifications(raw.as_array().unwrap(), NotifyLevel::Step);

        assert_eq!(
            got,
            vec![
                Notification::new(NotifyTarget::Slack("@someuser".into()))
                    .with_condition("build.state === 'passed'")
            ]
        );
    }

    #[test]
    fn first_key_in_priority_order_wins() {
        let raw = json!([{ "slack": "@someone", "email": "a@b.c" }]);

        let plugin = classify_notifications(raw.as_array().unwrap(), NotifyLevel::Plugin);
        assert_eq!(plugin[0].target, NotifyTarget::Email("a@b.c".into()));

        let step = classify_notifications(raw.as_array().unwrap(), NotifyLevel::Step);
        assert_eq!(step[0].target, NotifyTarget::Slack("@someone".into()));
    }

    #[test]
    fn unknown_shapes_are_dropped() {
        let raw = json!([
            "slack",
            { "teams": "channel" },
            { "github_commit_status": { "name": "no-context" } },
            { "slack": 42 }
        ]);

        assert!(classify_notifications(raw.as_array().unwrap(), NotifyLevel::Plugin).is_empty());
    }
}
