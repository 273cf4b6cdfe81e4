//! Run command handler
//!
//! Publishes (optionally), lists the scripts, asks for confirmation and
//! launches each one through the configured strategy.

use std::sync::Arc;

use anyhow::{bail, Result};
use dialoguer::Confirm;
use is_terminal::IsTerminal;
use serde_json::json;

use selfdeploy::application::{RunReport, ScriptExecutor, Selection};
use selfdeploy::domain::entities::ExecutionTarget;
use selfdeploy::domain::ports::LaunchContext;
use selfdeploy::infrastructure::{strategy_for, SystemClock, SystemCommandRunner};

use super::publish::{print_publish_report, publish_scripts};
use super::CommandContext;
use crate::ui::output::{emit, status_icon};

/// Execute the run command
pub fn cmd_run(
    ctx: &CommandContext,
    force: bool,
    publish: bool,
    environment: Option<String>,
) -> Result<()> {
    let config = &ctx.config;

    if publish {
        let environment = ctx.resolve_environment(environment)?;
        let report = publish_scripts(ctx, &environment, Selection::All, config.server_key.clone())?;
        print_publish_report(ctx, &report)?;
        if !report.is_success() {
            bail!("Publish failed; no scripts were launched");
        }
    }

    let scripts_dir = config.scripts_path.as_path();
    let targets = ScriptExecutor::discover(Some(scripts_dir))?;
    if targets.is_empty() {
        if ctx.json {
            emit(json!({"type": "run_complete", "launched": 0, "failed": 0}))?;
        } else {
            println!("No deployment scripts found in {}", scripts_dir.display());
        }
        return Ok(());
    }

    let executor = ScriptExecutor::new(
        strategy_for(
            config,
            Arc::new(SystemCommandRunner::new()),
            Arc::new(SystemClock),
        ),
        LaunchContext {
            working_dir: config.working_directory.clone(),
        },
    );

    if !force && !confirm_launch(ctx, &targets, executor.strategy_name())? {
        println!("Aborted.");
        return Ok(());
    }

    let report = executor.launch_all(scripts_dir, &targets);
    print_run_report(ctx, &report)?;

    if !report.is_success() {
        bail!(
            "{} of {} script(s) failed to launch",
            report.failures().count(),
            report.outcomes.len()
        );
    }
    Ok(())
}

fn confirm_launch(ctx: &CommandContext, targets: &[ExecutionTarget], strategy: &str) -> Result<bool> {
    if ctx.json || !std::io::stdin().is_terminal() {
        bail!("Refusing to launch without confirmation outside a terminal; pass --force");
    }

    println!("Scripts to launch ({}):", strategy);
    for target in targets {
        println!("  • {}", target.name);
    }
    println!();

    Ok(Confirm::new()
        .with_prompt(format!("Launch {} deployment script(s)?", targets.len()))
        .default(false)
        .interact()?)
}

fn print_run_report(ctx: &CommandContext, report: &RunReport) -> Result<()> {
    if ctx.json {
        for outcome in &report.outcomes {
            emit(json!({
                "type": if outcome.is_success() { "script_launched" } else { "launch_failed" },
                "script": outcome.script,
                "command": outcome.command,
                "unit": outcome.unit,
                "error": outcome.error().map(|e| e.to_string()),
            }))?;
        }
        emit(json!({
            "type": "run_complete",
            "strategy": report.strategy,
            "launched": report.outcomes.len() - report.failures().count(),
            "failed": report.failures().count(),
        }))?;
        return Ok(());
    }

    for outcome in &report.outcomes {
        match outcome.error() {
            None => {
                println!("  {} {}", status_icon(true), outcome.script);
                if let Some(unit) = &outcome.unit {
                    println!("    follow: journalctl -u {} -f", unit);
                }
            }
            Some(e) => println!("  {} {}", status_icon(false), e),
        }
    }
    if report.strategy == "shell" {
        println!("\nScripts run in the background; check their log files for results.");
    }
    Ok(())
}
