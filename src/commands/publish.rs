//! Publish command handler

use anyhow::{bail, Result};
use serde_json::json;

use selfdeploy::application::{PublishReport, PublishRequest, ScriptPublisher, Selection};
use selfdeploy::domain::services::DeploymentRegistry;
use selfdeploy::infrastructure::{FsFragmentRepository, ScriptTemplateRenderer, ScriptWriter};

use super::CommandContext;
use crate::ui::output::{emit, status_icon};

/// Execute the publish command
pub fn cmd_publish(
    ctx: &CommandContext,
    deployment: Option<String>,
    environment: Option<String>,
    all: bool,
    server: Option<String>,
) -> Result<()> {
    let environment = ctx.resolve_environment(environment)?;

    let (selection, filter) = match deployment {
        Some(name) if !all => (Selection::One(name), server),
        // Publishing everything on a host only renders that host's own slot
        _ => (Selection::All, ctx.config.server_key.clone()),
    };

    let report = publish_scripts(ctx, &environment, selection, filter)?;
    print_publish_report(ctx, &report)?;

    if !report.is_success() {
        bail!(
            "{} of {} script(s) failed to publish",
            report.failures().count(),
            report.results.len()
        );
    }
    Ok(())
}

/// Render and write scripts for `environment` using the configured directories
pub fn publish_scripts(
    ctx: &CommandContext,
    environment: &str,
    selection: Selection,
    server_filter: Option<String>,
) -> Result<PublishReport> {
    let config = &ctx.config;
    let publisher = ScriptPublisher::new(
        DeploymentRegistry::new(&config.environments),
        ScriptTemplateRenderer::new(FsFragmentRepository::new(&config.templates_path)),
        ScriptWriter::new(&config.scripts_path),
        &config.log_dir,
    );

    let request = PublishRequest::new(environment, selection)
        .with_server_filter(server_filter)
        .with_server_identity(config.server_key.clone());

    Ok(publisher.publish(&request)?)
}

pub fn print_publish_report(ctx: &CommandContext, report: &PublishReport) -> Result<()> {
    if ctx.json {
        for result in &report.results {
            match &result.outcome {
                Ok(path) => emit(json!({
                    "type": "script_written",
                    "script": result.script,
                    "deployment": result.deployment,
                    "server": result.server,
                    "path": path,
                }))?,
                Err(e) => emit(json!({
                    "type": "script_failed",
                    "script": result.script,
                    "deployment": result.deployment,
                    "server": result.server,
                    "error": e.to_string(),
                }))?,
            }
        }
        emit(json!({
            "type": "publish_complete",
            "environment": report.environment,
            "output_dir": report.output_dir,
            "written": report.written().count(),
            "failed": report.failures().count(),
        }))?;
        return Ok(());
    }

    println!(
        "Publishing [{}] → {}",
        report.environment,
        report.output_dir.display()
    );
    for result in &report.results {
        match &result.outcome {
            Ok(path) => println!("  {} {}", status_icon(true), path.display()),
            Err(e) => println!("  {} {}: {}", status_icon(false), result.script, e),
        }
    }
    println!(
        "\n{} written, {} failed",
        report.written().count(),
        report.failures().count()
    );
    Ok(())
}
