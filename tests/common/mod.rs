#![allow(dead_code, unused_imports)]

pub use monorepo_diff_test_utils::builders::env_map;
pub use monorepo_diff_test_utils::{
    init_tracing, plugins_json, PluginConfigBuilder, StepSpecBuilder, WatchRuleBuilder,
};

/// Environment the agent would provide for a build on `go-rewrite`.
pub fn agent_env() -> monorepo_diff::env::MapEnv {
    [
        ("BUILDKITE_BRANCH", "go-rewrite"),
        ("BUILDKITE_COMMIT", "123"),
        ("env3", "env-3"),
        ("env4", "env-4"),
    ]
    .into_iter()
    .collect()
}
