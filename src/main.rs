//! selfdeploy CLI - render deployment scripts and launch them
//!
//! Usage: selfdeploy <COMMAND>
//!
//! Commands:
//!   publish        Render deployment scripts into the scripts directory
//!   run            Launch every script in the scripts directory
//!   remote-deploy  Trigger `run` on every host of an environment over SSH
//!   scaffold       Write a starter fragment for a configured deployment

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod ui;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = commands::CommandContext::load(cli.config.as_deref(), cli.json)?;

    match cli.command {
        Commands::Publish {
            deployment,
            environment,
            all,
            server,
        } => commands::publish::cmd_publish(&ctx, deployment, environment, all, server),
        Commands::Run {
            force,
            publish,
            environment,
        } => commands::run::cmd_run(&ctx, force, publish, environment),
        Commands::RemoteDeploy {
            environment,
            publish,
        } => commands::remote::cmd_remote_deploy(&ctx, environment, publish),
        Commands::Scaffold {
            deployment,
            environment,
            force,
            per_server,
            publish,
        } => commands::scaffold::cmd_scaffold(
            &ctx,
            &deployment,
            environment,
            force,
            per_server,
            publish,
        ),
    }
}

/// Diagnostics go to stderr; `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(verbose).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "selfdeploy=info",
        2 => "selfdeploy=debug",
        _ => "selfdeploy=trace",
    }
}
