mod common;

use std::error::Error;

use serde_json::json;
use serde_yaml_ng::Value;

use monorepo_diff::config::{initialize_plugin, CommandSpec, Notification, NotifyTarget, StepSpec};
use monorepo_diff::pipeline::generate_pipeline;
use monorepo_diff::resolve_pipeline;

use common::{agent_env, init_tracing, plugins_json, PluginConfigBuilder, StepSpecBuilder};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn full_document_layout() -> TestResult {
    init_tracing();

    let steps = vec![
        StepSpec {
            soft_fail: Some(json!(true)),
            ..StepSpecBuilder::trigger("foo-service-pipeline")
                .message("build message")
                .notify(Notification::new(NotifyTarget::Slack("@adikari".into())))
                .build()
        },
        StepSpec {
            command: Some(CommandSpec::Single("command-to-run".into())),
            ..StepSpecBuilder::trigger("notification-test")
                .notify(Notification::new(NotifyTarget::Basecamp(
                    "https://basecamp-url".into(),
                )))
                .notify(Notification::new(NotifyTarget::GithubStatus {
                    context: "my-custom-status".into(),
                }))
                .notify(
                    Notification::new(NotifyTarget::Slack("@someuser".into()))
                        .with_condition("build.state === \"passed\""),
                )
                .build()
        },
        StepSpecBuilder::trigger("foo-service-pipeline")
            .group("my group")
            .message("build message")
            .build(),
    ];

    let plugin = PluginConfigBuilder::new()
        .wait(true)
        .notify(Notification::new(NotifyTarget::Email("foo@gmail.com".into())))
        .notify(Notification::new(NotifyTarget::Email("bar@gmail.com".into())))
        .notify(Notification::new(NotifyTarget::Basecamp("https://basecamp".into())))
        .notify(Notification::new(NotifyTarget::Webhook("https://webhook".into())))
        .notify(Notification::new(NotifyTarget::Slack("@adikari".into())))
        .notify(Notification::new(NotifyTarget::GithubStatus {
            context: "github-context".into(),
        }))
        .hook("echo \"hello world\"")
        .hook("cat ./file.txt")
        .build();

    let pipeline = generate_pipeline(&steps, &plugin)?;

    let want = r#"notify:
- email: foo@gmail.com
- email: bar@gmail.com
- basecamp_campfire: https://basecamp
- webhook: https://webhook
- slack: '@adikari'
- github_commit_status:
    context: github-context
steps:
- trigger: foo-service-pipeline
  build:
    message: build message
  soft_fail: true
  notify:
  - slack: '@adikari'
- trigger: notification-test
  command: command-to-run
  notify:
  - basecamp_campfire: https://basecamp-url
  - github_commit_status:
      context: my-custom-status
  - slack: '@someuser'
    if: build.state === "passed"
- group: my group
  steps:
  - trigger: foo-service-pipeline
    build:
      message: build message
- wait: null
- command: echo "hello world"
- command: cat ./file.txt
"#;

    assert_eq!(pipeline.yaml, want);
    assert!(pipeline.has_steps);
    Ok(())
}

#[test]
fn command_step_fields_render_in_order() -> TestResult {
    let steps = vec![
        StepSpecBuilder::command("make test")
            .label("tests")
            .agent("queue", "linux")
            .artifact("coverage/**")
            .env("CI", "true")
            .is_async(true)
            .build(),
    ];

    let pipeline = generate_pipeline(&steps, &PluginConfigBuilder::new().build())?;
    assert_eq!(
        pipeline.yaml,
        "steps:\n- label: tests\n  command: make test\n  agents:\n    queue: linux\n  artifacts:\n  - coverage/**\n  env:\n    CI: 'true'\n  async: true\n"
    );
    Ok(())
}

/// Config in, YAML out: the path a real run takes minus the processes.
#[test]
fn config_to_pipeline_end_to_end() -> TestResult {
    let data = plugins_json(&[(
        "monorepo-diff#v1",
        json!({
            "wait": true,
            "hooks": [{ "command": "echo done" }],
            "watch": [
                {
                    "path": "services/foo/",
                    "config": { "trigger": "foo-service", "build": { "message": "deploy foo" } }
                },
                {
                    "path": ["ops/**/*.yml"],
                    "skip_path": "ops/bar/",
                    "config": { "command": "make ops", "label": "ops" }
                },
                { "default": { "command": "echo nothing matched" } }
            ]
        }),
    )]);
    let plugin = initialize_plugin(&data, &agent_env())?;

    let pipeline = resolve_pipeline(
        &plugin,
        &["services/foo/serverless.yml", "ops/bar/config.yml", "README.md"],
    )?;
    let doc: Value = serde_yaml_ng::from_str(&pipeline.yaml)?;
    let steps = doc["steps"].as_sequence().ok_or("steps is not a list")?;

    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0]["trigger"], Value::from("foo-service"));
    assert_eq!(steps[0]["build"]["message"], Value::from("deploy foo"));
    assert_eq!(steps[0]["build"]["branch"], Value::from("go-rewrite"));
    assert_eq!(steps[0]["build"]["commit"], Value::from("123"));
    assert!(steps[1].get("wait").is_some());
    assert_eq!(steps[2]["command"], Value::from("echo done"));

    let fallback = resolve_pipeline(&plugin, &["README.md"])?;
    let doc: Value = serde_yaml_ng::from_str(&fallback.yaml)?;
    assert_eq!(doc["steps"][0]["command"], Value::from("echo nothing matched"));
    Ok(())
}
