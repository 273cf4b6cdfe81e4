//! Detached background-shell launcher

use std::sync::Arc;

use tracing::info;

use crate::domain::entities::ExecutionTarget;
use crate::domain::ports::{CommandRunner, LaunchContext, LaunchOutcome, LaunchStrategy};
use crate::domain::value_objects::{shell_quote, CommandLine};

/// Runs each script as `[sudo] bash -c 'sleep N; cd DIR && SCRIPT'`.
///
/// Fire-and-forget: a launch succeeds once the job is spawned. Whatever the
/// script does afterwards, including failing, is invisible here.
pub struct BackgroundShellLauncher {
    runner: Arc<dyn CommandRunner>,
    privileged: bool,
    grace_seconds: u64,
}

impl BackgroundShellLauncher {
    pub fn new(runner: Arc<dyn CommandRunner>, privileged: bool, grace_seconds: u64) -> Self {
        Self {
            runner,
            privileged,
            grace_seconds,
        }
    }

    pub fn command(&self, target: &ExecutionTarget, ctx: &LaunchContext) -> CommandLine {
        let mut script = String::new();
        if self.grace_seconds > 0 {
            script.push_str(&format!("sleep {}; ", self.grace_seconds));
        }
        script.push_str(&format!(
            "cd {} && {}",
            shell_quote(&ctx.working_dir.to_string_lossy()),
            shell_quote(&target.path.to_string_lossy())
        ));

        CommandLine::new("bash")
            .arg("-c")
            .arg(script)
            .elevated(self.privileged)
    }
}

impl LaunchStrategy for BackgroundShellLauncher {
    fn name(&self) -> &'static str {
        "shell"
    }

    fn launch(&self, target: &ExecutionTarget, ctx: &LaunchContext) -> LaunchOutcome {
        let command = self.command(target, ctx);
        info!(script = %target.name, command = %command, "starting background job");

        match self.runner.spawn_detached(&command) {
            Ok(()) => LaunchOutcome::started(&target.name, command.to_string()),
            Err(e) => LaunchOutcome::failed(&target.name, command.to_string(), e.to_string()),
        }
    }
}
