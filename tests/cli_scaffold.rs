//! Integration tests for `selfdeploy scaffold`.

mod common;

use common::*;

const CONFIG: &str = r#"
log_dir = "{root}/logs"
default_environment = "production"

[environments.production.app]
deploy_path = "{root}/srv/app"
branch = "main"

[environments.production.web.server01]
deploy_path = "{root}/srv/blue"
"#;

#[test]
fn scaffold_writes_starter_fragment() {
    let env = TestEnv::builder().with_config(CONFIG).build();

    let result = env.run(&["scaffold", "app"]);

    assert_success!(result);
    let fragment = env.read_project_file("deployments/app.sh.tmpl");
    assert!(fragment.contains("log \"branch: {{ branch }}\""));
    assert!(fragment.contains("log \"deploy_path: {{ deploy_path }}\""));
}

#[test]
fn scaffold_refuses_to_overwrite_without_force() {
    let env = TestEnv::builder()
        .with_config(CONFIG)
        .with_fragment("app", PLAIN_FRAGMENT)
        .build();

    let result = env.run(&["scaffold", "app"]);

    assert_failure!(result);
    assert_output_contains!(result, "already exists");
    assert_eq!(env.read_project_file("deployments/app.sh.tmpl"), PLAIN_FRAGMENT);

    assert_success!(env.run(&["scaffold", "app", "--force"]));
    assert_ne!(env.read_project_file("deployments/app.sh.tmpl"), PLAIN_FRAGMENT);
}

#[test]
fn scaffold_then_publish_renders_the_script() {
    let env = TestEnv::builder().with_config(CONFIG).build();

    let result = env.run(&["scaffold", "web", "--publish"]);

    assert_success!(result);
    assert_eq!(env.published_scripts(), vec!["web-server01.sh"]);
    assert!(env
        .read_project_file(".deployments/web-server01.sh")
        .contains("log \"self_deploy_server_key: server01\""));
}

#[test]
fn scaffold_unknown_deployment_fails() {
    let env = TestEnv::builder().with_config(CONFIG).build();

    let result = env.run(&["scaffold", "nope"]);

    assert_failure!(result);
    assert!(!env.project_path("deployments/nope.sh.tmpl").exists());
}

#[test]
fn scaffold_per_server_writes_slot_fragments() {
    let env = TestEnv::builder().with_config(CONFIG).build();

    let result = env.run(&["scaffold", "web", "--per-server", "--publish"]);

    assert_success!(result);
    assert!(env.project_path("deployments/web-server01.sh.tmpl").exists());
    assert!(!env.project_path("deployments/web.sh.tmpl").exists());
    let script = env.read_project_file(".deployments/web-server01.sh");
    assert!(script.contains("# Deployment steps for web-server01"));
    assert!(script.contains("log \"self_deploy_server_key: server01\""));
}
