//! Run Use Case
//!
//! Discover → (confirmation, owned by the caller) → launch each → report.
//! Launches are issued one after another; the launched work itself runs
//! detached and unordered.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::domain::entities::{ExecutionTarget, SCRIPT_EXTENSION};
use crate::domain::ports::{LaunchContext, LaunchOutcome, LaunchStrategy};
use crate::error::{SelfDeployError, SelfDeployResult};

/// Outcomes of one run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub scripts_dir: PathBuf,
    /// Strategy name (`shell`, `systemd`)
    pub strategy: &'static str,
    pub outcomes: Vec<LaunchOutcome>,
}

impl RunReport {
    /// True iff every launcher command succeeded (vacuously true when empty)
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(LaunchOutcome::is_success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &LaunchOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

/// Launches every script in the scripts directory through one strategy
pub struct ScriptExecutor {
    strategy: Box<dyn LaunchStrategy>,
    context: LaunchContext,
}

impl ScriptExecutor {
    pub fn new(strategy: Box<dyn LaunchStrategy>, context: LaunchContext) -> Self {
        Self { strategy, context }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// `.sh` files directly inside `dir`, sorted by file name.
    ///
    /// An unset or missing directory is an error; an empty one is not.
    pub fn discover(dir: Option<&Path>) -> SelfDeployResult<Vec<ExecutionTarget>> {
        let dir = match dir {
            Some(dir) if dir.is_dir() => dir,
            other => {
                return Err(SelfDeployError::ScriptsPathInvalid {
                    path: other.map(Path::to_path_buf),
                })
            }
        };

        let mut targets = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_script = path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(SCRIPT_EXTENSION);
            if !is_script {
                continue;
            }

            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                warn!(path = %path.display(), "skipping script with non UTF-8 name");
                continue;
            };
            let name = name.to_string();
            let path = path.canonicalize()?;
            debug!(script = %name, path = %path.display(), "discovered script");
            targets.push(ExecutionTarget::new(name, path));
        }

        targets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(targets)
    }

    /// Launch each target in order, never stopping at a failure
    pub fn launch_all(&self, scripts_dir: &Path, targets: &[ExecutionTarget]) -> RunReport {
        info!(
            strategy = self.strategy.name(),
            scripts = targets.len(),
            "launching deployment scripts"
        );

        let outcomes = targets
            .iter()
            .map(|target| {
                let outcome = self.strategy.launch(target, &self.context);
                if let Some(err) = outcome.error() {
                    warn!(error = %err, "launch failed");
                }
                outcome
            })
            .collect();

        RunReport {
            scripts_dir: scripts_dir.to_path_buf(),
            strategy: self.strategy.name(),
            outcomes,
        }
    }

    /// Discover and launch without a confirmation step
    pub fn run(&self, scripts_dir: Option<&Path>) -> SelfDeployResult<RunReport> {
        let targets = Self::discover(scripts_dir)?;
        let dir = scripts_dir.unwrap_or_else(|| Path::new(""));
        Ok(self.launch_all(dir, &targets))
    }
}
