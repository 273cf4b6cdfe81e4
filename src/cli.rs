use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// selfdeploy - render deployment scripts and launch them
#[derive(Parser, Debug)]
#[command(name = "selfdeploy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ./selfdeploy.toml, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render deployment scripts into the scripts directory
    Publish {
        /// Deployment to publish
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        deployment: Option<String>,

        /// Environment (default: config default_environment)
        #[arg(short, long)]
        environment: Option<String>,

        /// Publish every deployment in the environment
        #[arg(long)]
        all: bool,

        /// Only publish this server slot of a multi-server deployment
        #[arg(long, conflicts_with = "all", value_name = "KEY")]
        server: Option<String>,
    },

    /// Launch every script in the scripts directory
    Run {
        /// Run without confirmation
        #[arg(short, long)]
        force: bool,

        /// Publish all deployment scripts first
        #[arg(long)]
        publish: bool,

        /// Environment used by --publish
        #[arg(short, long)]
        environment: Option<String>,
    },

    /// Trigger `run` on every host of an environment over SSH
    RemoteDeploy {
        /// Environment to deploy (default: config default_environment)
        environment: Option<String>,

        /// Publish scripts on the remote hosts before running
        #[arg(long)]
        publish: bool,
    },

    /// Write a starter fragment for a configured deployment
    Scaffold {
        deployment: String,

        /// Environment (default: config default_environment)
        #[arg(short, long)]
        environment: Option<String>,

        /// Overwrite an existing fragment
        #[arg(short, long)]
        force: bool,

        /// One fragment per server slot instead of a shared one
        #[arg(long)]
        per_server: bool,

        /// Publish the deployment right after scaffolding
        #[arg(long)]
        publish: bool,
    },
}
