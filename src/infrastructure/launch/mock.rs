//! Recording CommandRunner for unit tests

use std::io;
use std::sync::Mutex;

use crate::domain::ports::{CommandOutput, CommandRunner};
use crate::domain::value_objects::CommandLine;

/// Records every command instead of running it
#[derive(Default)]
pub(crate) struct MockCommandRunner {
    waited: Mutex<Vec<CommandLine>>,
    detached: Mutex<Vec<CommandLine>>,
    passthrough: Mutex<Vec<CommandLine>>,
    exit: Option<(i32, String)>,
    spawn_error: Option<String>,
    fail_matching: Option<String>,
}

impl MockCommandRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make every waited-on command exit with `code` and `stderr`
    pub(crate) fn with_exit(mut self, code: i32, stderr: &str) -> Self {
        self.exit = Some((code, stderr.to_string()));
        self
    }

    /// Make every spawn fail
    pub(crate) fn with_spawn_error(mut self, message: &str) -> Self {
        self.spawn_error = Some(message.to_string());
        self
    }

    /// Make passthrough commands containing `needle` exit 255
    pub(crate) fn with_failure_for(mut self, needle: &str) -> Self {
        self.fail_matching = Some(needle.to_string());
        self
    }

    pub(crate) fn waited(&self) -> Vec<CommandLine> {
        self.waited.lock().unwrap().clone()
    }

    pub(crate) fn detached(&self) -> Vec<CommandLine> {
        self.detached.lock().unwrap().clone()
    }

    pub(crate) fn passed_through(&self) -> Vec<CommandLine> {
        self.passthrough.lock().unwrap().clone()
    }

    fn exit_code(&self) -> i32 {
        self.exit.as_ref().map_or(0, |(code, _)| *code)
    }
}

impl CommandRunner for MockCommandRunner {
    fn output(&self, command: &CommandLine) -> io::Result<CommandOutput> {
        self.waited.lock().unwrap().push(command.clone());
        Ok(CommandOutput {
            code: Some(self.exit_code()),
            stdout: String::new(),
            stderr: self.exit.as_ref().map(|(_, s)| s.clone()).unwrap_or_default(),
        })
    }

    fn spawn_detached(&self, command: &CommandLine) -> io::Result<()> {
        if let Some(message) = &self.spawn_error {
            return Err(io::Error::new(io::ErrorKind::NotFound, message.clone()));
        }
        self.detached.lock().unwrap().push(command.clone());
        Ok(())
    }

    fn passthrough(&self, command: &CommandLine) -> io::Result<Option<i32>> {
        self.passthrough.lock().unwrap().push(command.clone());
        let failed = self
            .fail_matching
            .as_ref()
            .is_some_and(|needle| command.to_string().contains(needle.as_str()));
        Ok(Some(if failed { 255 } else { self.exit_code() }))
    }
}
