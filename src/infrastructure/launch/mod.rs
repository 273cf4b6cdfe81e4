//! Launch strategies
//!
//! - `BackgroundShellLauncher` - detached `bash -c` job
//! - `SystemdUnitLauncher` - `systemd-run` transient unit

mod background;
#[cfg(test)]
pub(crate) mod mock;
mod systemd;
pub mod unit_name;

use std::sync::Arc;

pub use background::BackgroundShellLauncher;
pub use systemd::SystemdUnitLauncher;

use crate::config::{Config, ExecutionMode};
use crate::domain::ports::{Clock, CommandRunner, LaunchStrategy};

/// Build the strategy selected by `config.execution.mode`
pub fn strategy_for(
    config: &Config,
    runner: Arc<dyn CommandRunner>,
    clock: Arc<dyn Clock>,
) -> Box<dyn LaunchStrategy> {
    let execution = &config.execution;
    match execution.mode {
        ExecutionMode::Shell => Box::new(BackgroundShellLauncher::new(
            runner,
            execution.privileged,
            execution.grace_seconds,
        )),
        ExecutionMode::Systemd => Box::new(SystemdUnitLauncher::new(
            runner,
            clock,
            execution.privileged,
            config.systemd.clone(),
        )),
    }
}
