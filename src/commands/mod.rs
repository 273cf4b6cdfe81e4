//! Command handlers
//!
//! Each handler wires the library use cases to real infrastructure and
//! renders the result for the operator (text or `--json`).

use std::path::Path;

use anyhow::{bail, Result};

use selfdeploy::config::Config;

use crate::ui::output::print_config_warnings;

pub mod publish;
pub mod remote;
pub mod run;
pub mod scaffold;

/// Loaded configuration plus global flags
pub struct CommandContext {
    pub config: Config,
    pub json: bool,
}

impl CommandContext {
    pub fn load(explicit: Option<&Path>, json: bool) -> Result<Self> {
        let loaded = Config::discover(explicit)?;

        match &loaded.source {
            Some(source) => {
                tracing::debug!(config = %source.display(), "configuration loaded");
                if !json {
                    print_config_warnings(source, &loaded.warnings);
                }
            }
            None => tracing::debug!("no config file found, using defaults"),
        }

        Ok(Self {
            config: loaded.config,
            json,
        })
    }

    /// `-e`, then `default_environment`, then the only configured environment
    pub fn resolve_environment(&self, requested: Option<String>) -> Result<String> {
        resolve_environment(&self.config, requested)
    }
}

fn resolve_environment(config: &Config, requested: Option<String>) -> Result<String> {
    if let Some(name) = requested.or_else(|| config.default_environment.clone()) {
        return Ok(name);
    }

    let mut names = config.environments.keys();
    match (names.next(), names.next()) {
        (Some(only), None) => Ok(only.clone()),
        (None, _) => bail!("No environments configured"),
        (Some(_), Some(_)) => bail!(
            "Multiple environments configured; pass -e <ENVIRONMENT> or set default_environment"
        ),
    }
}
