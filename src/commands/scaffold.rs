//! Scaffold command handler

use anyhow::{bail, Result};
use serde_json::json;

use selfdeploy::application::{scaffold_fragment, Selection};
use selfdeploy::domain::services::DeploymentRegistry;

use super::publish::{print_publish_report, publish_scripts};
use super::CommandContext;
use crate::ui::output::emit;

/// Execute the scaffold command
pub fn cmd_scaffold(
    ctx: &CommandContext,
    deployment: &str,
    environment: Option<String>,
    force: bool,
    per_server: bool,
    publish: bool,
) -> Result<()> {
    let config = &ctx.config;
    let environment = ctx.resolve_environment(environment)?;

    let paths = scaffold_fragment(
        &DeploymentRegistry::new(&config.environments),
        &environment,
        deployment,
        &config.templates_path,
        per_server,
        force,
    )?;

    for path in &paths {
        if ctx.json {
            emit(json!({
                "type": "fragment_created",
                "deployment": deployment,
                "environment": environment,
                "path": path,
            }))?;
        } else {
            println!("✓ Created {}", path.display());
        }
    }

    if publish {
        let report = publish_scripts(
            ctx,
            &environment,
            Selection::One(deployment.to_string()),
            None,
        )?;
        print_publish_report(ctx, &report)?;
        if !report.is_success() {
            bail!("Publish failed for [{}]", deployment);
        }
    } else if !ctx.json {
        println!("Edit it, then run: selfdeploy publish {} -e {}", deployment, environment);
    }
    Ok(())
}
