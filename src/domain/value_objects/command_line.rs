//! A program invocation that can echo itself for operators

use std::fmt;

use super::shell::shell_quote;

/// Program plus arguments, executed without an intermediate shell.
///
/// `Display` renders the shell-quoted form shown in logs and failure reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Prefix with `sudo` when `privileged`
    pub fn elevated(self, privileged: bool) -> Self {
        if !privileged {
            return self;
        }
        let mut args = Vec::with_capacity(self.args.len() + 1);
        args.push(self.program);
        args.extend(self.args);
        Self {
            program: "sudo".to_string(),
            args,
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_only_when_needed() {
        let cmd = CommandLine::new("bash").args(["-c", "sleep 5; cd /srv && /srv/app.sh"]);
        assert_eq!(cmd.to_string(), "bash -c 'sleep 5; cd /srv && /srv/app.sh'");
    }

    #[test]
    fn elevated_prefixes_sudo() {
        let cmd = CommandLine::new("systemd-run").arg("--collect").elevated(true);
        assert_eq!(cmd.program, "sudo");
        assert_eq!(cmd.args, vec!["systemd-run", "--collect"]);
    }

    #[test]
    fn not_elevated_is_unchanged() {
        let cmd = CommandLine::new("bash").arg("x.sh").elevated(false);
        assert_eq!(cmd.to_string(), "bash x.sh");
    }
}
