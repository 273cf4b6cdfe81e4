//! LaunchStrategy port
//!
//! A launch strategy starts one discovered script as independent OS-level
//! work. The executor's discover/report loop only sees this trait, so new
//! mechanisms plug in without touching it.

use std::path::PathBuf;

use crate::domain::entities::ExecutionTarget;
use crate::error::SelfDeployError;

/// Invocation-wide launch settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchContext {
    /// Fixed working root the launched script starts in
    pub working_dir: PathBuf,
}

/// Whether the launcher itself succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchStatus {
    Started,
    Failed { reason: String },
}

/// Result of launching one script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOutcome {
    pub script: String,
    /// The command that was issued, shell-quoted
    pub command: String,
    /// Transient unit name (systemd strategy only)
    pub unit: Option<String>,
    pub status: LaunchStatus,
}

impl LaunchOutcome {
    pub fn started(script: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            command: command.into(),
            unit: None,
            status: LaunchStatus::Started,
        }
    }

    pub fn failed(
        script: impl Into<String>,
        command: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            script: script.into(),
            command: command.into(),
            unit: None,
            status: LaunchStatus::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == LaunchStatus::Started
    }

    /// The failure as a `LaunchFailed` error, if this launch failed
    pub fn error(&self) -> Option<SelfDeployError> {
        match &self.status {
            LaunchStatus::Started => None,
            LaunchStatus::Failed { reason } => Some(SelfDeployError::LaunchFailed {
                script: self.script.clone(),
                command: self.command.clone(),
                reason: reason.clone(),
            }),
        }
    }
}

/// Mechanism that starts a script without waiting for it to finish
pub trait LaunchStrategy: Send + Sync {
    /// Short name for logs (`shell`, `systemd`)
    fn name(&self) -> &'static str;

    /// Issue the launcher command for one script.
    ///
    /// Success means the launcher accepted the work; the script's own exit
    /// status is never observed.
    fn launch(&self, target: &ExecutionTarget, ctx: &LaunchContext) -> LaunchOutcome;
}
