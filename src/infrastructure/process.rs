//! std::process implementation of the CommandRunner port

use std::io;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::domain::ports::{CommandOutput, CommandRunner};
use crate::domain::value_objects::CommandLine;

/// Runs commands on the local machine
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }

    fn command(line: &CommandLine) -> Command {
        let mut cmd = Command::new(&line.program);
        cmd.args(&line.args);
        cmd
    }
}

impl CommandRunner for SystemCommandRunner {
    fn output(&self, line: &CommandLine) -> io::Result<CommandOutput> {
        debug!(command = %line, "running");
        let output = Self::command(line).stdin(Stdio::null()).output()?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn spawn_detached(&self, line: &CommandLine) -> io::Result<()> {
        debug!(command = %line, "spawning detached");
        let mut cmd = Self::command(line);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        // Own process group: a Ctrl-C in the invoking terminal must not reach it.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        // Dropping the handle does not kill or wait for the child.
        let _child = cmd.spawn()?;
        Ok(())
    }

    fn passthrough(&self, line: &CommandLine) -> io::Result<Option<i32>> {
        debug!(command = %line, "running with inherited stdio");
        let status = Self::command(line)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;
        Ok(status.code())
    }
}
