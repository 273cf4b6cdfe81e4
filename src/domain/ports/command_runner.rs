//! CommandRunner port - external process execution
//!
//! Launch strategies and the remote trigger issue every external command
//! through this trait, so tests can record commands instead of running them.

use std::io;

use crate::domain::value_objects::CommandLine;

/// Captured result of a command that was waited on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Executes external commands
pub trait CommandRunner: Send + Sync {
    /// Run to completion, capturing stdout/stderr
    fn output(&self, command: &CommandLine) -> io::Result<CommandOutput>;

    /// Start without waiting; the child outlives this call
    fn spawn_detached(&self, command: &CommandLine) -> io::Result<()>;

    /// Run to completion with inherited stdio, returning the exit code
    fn passthrough(&self, command: &CommandLine) -> io::Result<Option<i32>>;
}
