//! Remote trigger
//!
//! Runs `selfdeploy run --force` on every host of an environment over SSH,
//! one host at a time, with the terminal attached.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::Environment;
use crate::domain::ports::CommandRunner;
use crate::domain::value_objects::{shell_quote, CommandLine};
use crate::error::{SelfDeployError, SelfDeployResult};

/// The SSH invocation for one host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCommand {
    pub host: String,
    /// `user@host`
    pub destination: String,
    pub command: CommandLine,
}

/// Result for one host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteResult {
    pub host: String,
    pub command: String,
    /// `None` when ssh could not be started or was killed by a signal
    pub exit_code: Option<i32>,
    pub error: Option<String>,
}

impl RemoteResult {
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

#[derive(Debug, Clone)]
pub struct RemoteReport {
    pub environment: String,
    pub results: Vec<RemoteResult>,
}

impl RemoteReport {
    pub fn is_success(&self) -> bool {
        self.results.iter().all(RemoteResult::is_success)
    }
}

/// Build the per-host SSH commands for `environment`.
///
/// `default_user` applies when the environment has no `ssh_user`.
pub fn remote_commands(
    name: &str,
    environment: &Environment,
    remote_command: &str,
    publish: bool,
    default_user: Option<&str>,
) -> SelfDeployResult<Vec<RemoteCommand>> {
    if environment.hosts.is_empty() {
        return Err(SelfDeployError::RemoteNotConfigured {
            environment: name.to_string(),
            field: "hosts".to_string(),
        });
    }
    let remote_path = environment
        .remote_path
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| SelfDeployError::RemoteNotConfigured {
            environment: name.to_string(),
            field: "remote_path".to_string(),
        })?;

    let mut script = format!("cd {} && {} run --force", shell_quote(remote_path), remote_command);
    if publish {
        script.push_str(" --publish");
    }

    let user = environment.ssh_user.as_deref().or(default_user);
    Ok(environment
        .hosts
        .iter()
        .map(|host| {
            let destination = match user {
                Some(user) => format!("{}@{}", user, host),
                None => host.clone(),
            };
            RemoteCommand {
                host: host.clone(),
                command: CommandLine::new("ssh")
                    .arg("-t")
                    .arg(destination.as_str())
                    .arg(script.as_str()),
                destination,
            }
        })
        .collect())
}

/// Executes remote commands through a [`CommandRunner`]
pub struct RemoteTrigger {
    runner: Arc<dyn CommandRunner>,
}

impl RemoteTrigger {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Trigger every host, continuing past failures
    pub fn trigger(&self, environment: &str, commands: &[RemoteCommand]) -> RemoteReport {
        let results = commands
            .iter()
            .map(|remote| {
                info!(host = %remote.host, command = %remote.command, "triggering remote deployment");
                let result = match self.runner.passthrough(&remote.command) {
                    Ok(code) => RemoteResult {
                        host: remote.host.clone(),
                        command: remote.command.to_string(),
                        exit_code: code,
                        error: None,
                    },
                    Err(e) => RemoteResult {
                        host: remote.host.clone(),
                        command: remote.command.to_string(),
                        exit_code: None,
                        error: Some(e.to_string()),
                    },
                };
                if !result.is_success() {
                    warn!(host = %remote.host, exit_code = ?result.exit_code, "remote deployment failed");
                }
                result
            })
            .collect();

        RemoteReport {
            environment: environment.to_string(),
            results,
        }
    }
}
