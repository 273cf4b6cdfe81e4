//! Test environment builder for isolated selfdeploy testing.
//!
//! `TestEnv` owns a temp project directory, a temp home directory and a
//! directory of fake `sudo`, `systemd-run` and `ssh` executables placed first
//! on `PATH`. The fakes append their arguments to `calls/<tool>.log`.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Result of running a selfdeploy CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Check if command succeeded
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// `sudo` that records its arguments and runs the command unprivileged
const FAKE_SUDO: &str = r#"#!/usr/bin/env bash
echo "$*" >> "$SELFDEPLOY_TEST_CALLS/sudo.log"
exec "$@"
"#;

/// `systemd-run` that records its arguments; `FAKE_SYSTEMD_EXIT` forces a failure
const FAKE_SYSTEMD_RUN: &str = r#"#!/usr/bin/env bash
echo "$*" >> "$SELFDEPLOY_TEST_CALLS/systemd-run.log"
code="${FAKE_SYSTEMD_EXIT:-0}"
if [ "$code" != "0" ]; then
  echo "Failed to start transient service unit: Access denied" >&2
fi
exit "$code"
"#;

/// `ssh` that records its arguments; `FAKE_SSH_FAIL_HOST` makes that host exit 255
const FAKE_SSH: &str = r#"#!/usr/bin/env bash
echo "$*" >> "$SELFDEPLOY_TEST_CALLS/ssh.log"
if [ -n "${FAKE_SSH_FAIL_HOST:-}" ] && [[ "$*" == *"$FAKE_SSH_FAIL_HOST"* ]]; then
  exit 255
fi
exit 0
"#;

/// Isolated test environment with temp directories.
pub struct TestEnv {
    /// Temporary directory for the project (cwd of every run)
    pub project_root: TempDir,
    /// Temporary directory for HOME
    pub home_dir: TempDir,
    bin_dir: PathBuf,
    selfdeploy_bin: PathBuf,
}

impl TestEnv {
    /// Create a new TestEnvBuilder
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Project root as a string, for embedding in TOML
    pub fn root_str(&self) -> String {
        self.project_root.path().display().to_string()
    }

    /// Run selfdeploy in this environment from project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run selfdeploy from project root with extra env vars.
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, env_vars)
    }

    /// Run selfdeploy from a specific directory with extra env vars.
    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let path = match std::env::var_os("PATH") {
            Some(original) => {
                let mut paths = vec![self.bin_dir.clone()];
                paths.extend(std::env::split_paths(&original));
                std::env::join_paths(paths).expect("Failed to build PATH")
            }
            None => self.bin_dir.clone().into_os_string(),
        };

        let mut cmd = Command::new(&self.selfdeploy_bin);
        cmd.current_dir(cwd)
            .args(args)
            .env("PATH", path)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env("SELFDEPLOY_TEST_CALLS", self.calls_dir())
            .env("USER", "tester")
            .env_remove("SELFDEPLOY_CONFIG")
            .env_remove("SELFDEPLOY_ENV")
            .env_remove("SELFDEPLOY_SERVER_KEY")
            .env_remove("SELFDEPLOY_EXECUTION_MODE")
            .env_remove("SELFDEPLOY_USER")
            .env_remove("RUST_LOG");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute selfdeploy");
        output_to_result(output)
    }

    fn calls_dir(&self) -> PathBuf {
        self.project_path("calls")
    }

    /// Lines recorded by a fake tool (`sudo`, `systemd-run`, `ssh`)
    pub fn calls(&self, tool: &str) -> Vec<String> {
        std::fs::read_to_string(self.calls_dir().join(format!("{}.log", tool)))
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Read a file from the project directory
    pub fn read_project_file(&self, relative_path: &str) -> String {
        std::fs::read_to_string(self.project_path(relative_path))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative_path, e))
    }

    /// Write a file to the project directory
    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Write `deployments/<name>.sh.tmpl`
    pub fn write_fragment(&self, name: &str, content: &str) {
        self.write_project_file(&format!("deployments/{}.sh.tmpl", name), content);
    }

    /// Names of the `.sh` files in the scripts directory, sorted
    pub fn published_scripts(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.project_path(".deployments"))
            .map(|entries| {
                entries
                    .flatten()
                    .filter_map(|e| e.file_name().to_str().map(str::to_string))
                    .filter(|n| n.ends_with(".sh"))
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    config: Option<String>,
    fragments: Vec<(String, String)>,
}

impl TestEnvBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: None,
            fragments: Vec::new(),
        }
    }

    /// `selfdeploy.toml` content. `{root}` is replaced with the project root.
    pub fn with_config(mut self, toml: &str) -> Self {
        self.config = Some(toml.to_string());
        self
    }

    /// Add a fragment under `deployments/`
    pub fn with_fragment(mut self, name: &str, content: &str) -> Self {
        self.fragments.push((name.to_string(), content.to_string()));
        self
    }

    /// Build the test environment
    pub fn build(self) -> TestEnv {
        let project_root = TempDir::new().expect("Failed to create project temp dir");
        let home_dir = TempDir::new().expect("Failed to create home temp dir");
        let bin_dir = project_root.path().join("fake-bin");
        std::fs::create_dir_all(&bin_dir).expect("Failed to create fake bin dir");
        std::fs::create_dir_all(project_root.path().join("calls"))
            .expect("Failed to create calls dir");

        for (name, script) in [
            ("sudo", FAKE_SUDO),
            ("systemd-run", FAKE_SYSTEMD_RUN),
            ("ssh", FAKE_SSH),
        ] {
            write_executable(&bin_dir.join(name), script);
        }

        let env = TestEnv {
            project_root,
            home_dir,
            bin_dir,
            selfdeploy_bin: PathBuf::from(env!("CARGO_BIN_EXE_selfdeploy")),
        };

        if let Some(config) = self.config {
            env.write_project_file("selfdeploy.toml", &config.replace("{root}", &env.root_str()));
        }
        for (name, content) in self.fragments {
            env.write_fragment(&name, &content);
        }

        env
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn write_executable(path: &Path, content: &str) {
    std::fs::write(path, content).expect("Failed to write fake tool");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod fake tool");
    }
}
