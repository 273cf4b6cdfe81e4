//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::entities::Environment;
use crate::error::SelfDeployResult;

use super::loader::{self, LoadedConfig};

/// How discovered scripts are launched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Detached `bash -c` job
    #[default]
    #[serde(alias = "background-shell", alias = "background")]
    Shell,
    /// `systemd-run` transient unit
    Systemd,
}

impl ExecutionMode {
    /// Parse the value of `SELFDEPLOY_EXECUTION_MODE`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "shell" | "background-shell" | "background" => Some(Self::Shell),
            "systemd" => Some(Self::Systemd),
            _ => None,
        }
    }
}

/// systemd `IOSchedulingClass=`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum IoSchedulingClass {
    Idle,
    #[default]
    BestEffort,
    #[serde(alias = "real-time")]
    Realtime,
}

impl IoSchedulingClass {
    pub fn as_systemd_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::BestEffort => "best-effort",
            Self::Realtime => "realtime",
        }
    }
}

/// Launch settings shared by both strategies
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExecutionConfig {
    #[serde(default)]
    pub mode: ExecutionMode,

    /// Prefix launcher commands with `sudo`
    #[serde(default = "default_true")]
    pub privileged: bool,

    /// Background strategy settle delay
    #[serde(default = "default_grace_seconds")]
    pub grace_seconds: u64,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::default(),
            privileged: true,
            grace_seconds: default_grace_seconds(),
        }
    }
}

/// Resource governance for transient units
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SystemdConfig {
    #[serde(default = "default_nice")]
    pub nice: i32,

    #[serde(default)]
    pub io_scheduling_class: IoSchedulingClass,

    #[serde(default = "default_io_priority")]
    pub io_scheduling_priority: u8,

    /// Garbage-collect the unit after it finishes
    #[serde(default = "default_true")]
    pub collect: bool,

    /// Run-as user override
    #[serde(default)]
    pub user: Option<String>,

    /// Environment injected with `--setenv`
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl Default for SystemdConfig {
    fn default() -> Self {
        Self {
            nice: default_nice(),
            io_scheduling_class: IoSchedulingClass::default(),
            io_scheduling_priority: default_io_priority(),
            collect: true,
            user: None,
            env: BTreeMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_grace_seconds() -> u64 {
    5
}

fn default_nice() -> i32 {
    10
}

fn default_io_priority() -> u8 {
    7
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("storage/self-deployments/logs")
}

fn default_templates_path() -> PathBuf {
    PathBuf::from("deployments")
}

fn default_scripts_path() -> PathBuf {
    PathBuf::from(".deployments")
}

fn default_working_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_remote_command() -> String {
    "selfdeploy".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Root of per-script log directories
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Fragment lookup directory
    #[serde(default = "default_templates_path")]
    pub templates_path: PathBuf,

    /// Output directory for rendered scripts
    #[serde(default = "default_scripts_path")]
    pub scripts_path: PathBuf,

    /// Fixed working root for launched scripts
    #[serde(default = "default_working_directory")]
    pub working_directory: PathBuf,

    #[serde(default)]
    pub default_environment: Option<String>,

    /// Local server identity
    #[serde(default)]
    pub server_key: Option<String>,

    /// Program invoked on remote hosts
    #[serde(default = "default_remote_command")]
    pub remote_command: String,

    #[serde(default)]
    pub execution: ExecutionConfig,

    #[serde(default)]
    pub systemd: SystemdConfig,

    #[serde(default)]
    pub environments: BTreeMap<String, Environment>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            templates_path: default_templates_path(),
            scripts_path: default_scripts_path(),
            working_directory: default_working_directory(),
            default_environment: None,
            server_key: None,
            remote_command: default_remote_command(),
            execution: ExecutionConfig::default(),
            systemd: SystemdConfig::default(),
            environments: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Find and load the active configuration, then apply env overrides.
    pub fn discover(explicit: Option<&Path>) -> SelfDeployResult<LoadedConfig> {
        loader::discover(explicit)
    }

    /// Make every relative path absolute against `base`
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        for path in [
            &mut self.log_dir,
            &mut self.templates_path,
            &mut self.scripts_path,
            &mut self.working_directory,
        ] {
            if path.is_relative() {
                *path = normalize(&base.join(&*path));
            }
        }
        self
    }
}

/// Drop `.` components so resolved paths read cleanly in scripts and logs
fn normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut out = PathBuf::new();
    for component in path.components() {
        if component != Component::CurDir {
            out.push(component);
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
