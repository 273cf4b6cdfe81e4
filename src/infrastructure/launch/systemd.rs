//! systemd transient-unit launcher

use std::sync::Arc;

use tracing::{info, warn};

use super::unit_name::unit_name;
use crate::config::SystemdConfig;
use crate::domain::entities::ExecutionTarget;
use crate::domain::ports::{Clock, CommandRunner, LaunchContext, LaunchOutcome, LaunchStrategy};
use crate::domain::value_objects::CommandLine;

/// Runs each script in its own `systemd-run` transient unit.
///
/// Success is the exit status of `systemd-run` itself: the unit was
/// accepted. The script's own result lives in the unit's journal.
pub struct SystemdUnitLauncher {
    runner: Arc<dyn CommandRunner>,
    clock: Arc<dyn Clock>,
    privileged: bool,
    options: SystemdConfig,
}

impl SystemdUnitLauncher {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        clock: Arc<dyn Clock>,
        privileged: bool,
        options: SystemdConfig,
    ) -> Self {
        Self {
            runner,
            clock,
            privileged,
            options,
        }
    }

    pub fn command(&self, target: &ExecutionTarget, ctx: &LaunchContext, unit: &str) -> CommandLine {
        let opts = &self.options;
        let mut cmd = CommandLine::new("systemd-run")
            .arg(format!("--unit={}", unit))
            .arg(format!("--description=selfdeploy {}", target.name))
            .arg(format!("--property=Nice={}", opts.nice))
            .arg(format!(
                "--property=IOSchedulingClass={}",
                opts.io_scheduling_class.as_systemd_str()
            ))
            .arg(format!(
                "--property=IOSchedulingPriority={}",
                opts.io_scheduling_priority
            ))
            .arg(format!(
                "--property=WorkingDirectory={}",
                ctx.working_dir.display()
            ));

        if let Some(user) = &opts.user {
            cmd = cmd.arg(format!("--uid={}", user));
        }
        for (key, value) in &opts.env {
            cmd = cmd.arg(format!("--setenv={}={}", key, value));
        }
        if opts.collect {
            cmd = cmd.arg("--collect");
        }

        cmd.arg("/bin/bash")
            .arg(target.path.to_string_lossy())
            .elevated(self.privileged)
    }
}

impl LaunchStrategy for SystemdUnitLauncher {
    fn name(&self) -> &'static str {
        "systemd"
    }

    fn launch(&self, target: &ExecutionTarget, ctx: &LaunchContext) -> LaunchOutcome {
        let unit = unit_name(target.stem(), self.clock.now());
        let command = self.command(target, ctx, &unit);
        info!(script = %target.name, unit = %unit, command = %command, "starting transient unit");

        let outcome = match self.runner.output(&command) {
            Ok(output) if output.success() => {
                LaunchOutcome::started(&target.name, command.to_string())
            }
            Ok(output) => {
                let reason = match output.stderr.trim() {
                    "" => match output.code {
                        Some(code) => format!("systemd-run exited with code {}", code),
                        None => "systemd-run terminated by signal".to_string(),
                    },
                    stderr => stderr.to_string(),
                };
                LaunchOutcome::failed(&target.name, command.to_string(), reason)
            }
            Err(e) => LaunchOutcome::failed(&target.name, command.to_string(), e.to_string()),
        };

        if !outcome.is_success() {
            warn!(script = %target.name, unit = %unit, "transient unit was not started");
        }

        outcome.with_unit(unit)
    }
}
