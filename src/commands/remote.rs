//! Remote deploy command handler

use std::sync::Arc;

use anyhow::{bail, Result};
use serde_json::json;

use selfdeploy::application::{remote_commands, RemoteTrigger};
use selfdeploy::domain::services::DeploymentRegistry;
use selfdeploy::infrastructure::SystemCommandRunner;

use super::CommandContext;
use crate::ui::output::{emit, status_icon};

/// Execute the remote-deploy command
pub fn cmd_remote_deploy(
    ctx: &CommandContext,
    environment: Option<String>,
    publish: bool,
) -> Result<()> {
    let config = &ctx.config;
    let name = ctx.resolve_environment(environment)?;
    let env = DeploymentRegistry::new(&config.environments).environment(&name)?;

    let local_user = std::env::var("USER").ok();
    let commands = remote_commands(
        &name,
        env,
        &config.remote_command,
        publish,
        local_user.as_deref(),
    )?;

    if !ctx.json {
        println!("Deploying [{}] to {} host(s)", name, commands.len());
    }

    let report = RemoteTrigger::new(Arc::new(SystemCommandRunner::new())).trigger(&name, &commands);

    for result in &report.results {
        if ctx.json {
            emit(json!({
                "type": "remote_result",
                "host": result.host,
                "command": result.command,
                "exit_code": result.exit_code,
                "error": result.error,
            }))?;
            continue;
        }
        match (&result.error, result.exit_code) {
            (Some(e), _) => println!("{} {}: {}", status_icon(false), result.host, e),
            (None, Some(0)) => println!("{} {}", status_icon(true), result.host),
            (None, Some(code)) => {
                println!("{} {}: exited with code {}", status_icon(false), result.host, code)
            }
            (None, None) => println!("{} {}: terminated by signal", status_icon(false), result.host),
        }
    }

    if !report.is_success() {
        let failed: Vec<&str> = report
            .results
            .iter()
            .filter(|r| !r.is_success())
            .map(|r| r.host.as_str())
            .collect();
        bail!("Remote deployment failed on: {}", failed.join(", "));
    }
    Ok(())
}
