//! Configuration discovery and loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{SelfDeployError, SelfDeployResult};

use super::types::{Config, ExecutionMode};

/// File name looked up in the current directory
pub const PROJECT_CONFIG_FILE: &str = "selfdeploy.toml";

/// Env var naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "SELFDEPLOY_CONFIG";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// The active configuration and where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
    /// `None` when running on built-in defaults
    pub source: Option<PathBuf>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> SelfDeployResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| SelfDeployError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .rsplit('.')
                .next()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Find the active configuration file and load it.
///
/// Order: `explicit`, `$SELFDEPLOY_CONFIG`, `./selfdeploy.toml`,
/// `<config dir>/selfdeploy/config.toml`, built-in defaults. Relative paths
/// in the result are resolved and env overrides applied.
pub fn discover(explicit: Option<&Path>) -> SelfDeployResult<LoadedConfig> {
    let cwd = std::env::current_dir()?;
    let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    let user_config = dirs::config_dir().map(|d| d.join("selfdeploy").join("config.toml"));

    let loaded = discover_in(&cwd, explicit, from_env.as_deref(), user_config.as_deref())?;
    Ok(LoadedConfig {
        config: with_env_overrides(loaded.config),
        ..loaded
    })
}

/// Discovery without touching process state (no env overrides applied)
pub fn discover_in(
    cwd: &Path,
    explicit: Option<&Path>,
    from_env: Option<&Path>,
    user_config: Option<&Path>,
) -> SelfDeployResult<LoadedConfig> {
    // Named files must exist; discovered ones are optional.
    let named = explicit.or(from_env).map(|p| absolute(cwd, p));
    let candidate = named.or_else(|| {
        [Some(cwd.join(PROJECT_CONFIG_FILE)), user_config.map(Path::to_path_buf)]
            .into_iter()
            .flatten()
            .find(|p| p.is_file())
    });

    let Some(path) = candidate else {
        debug!("no config file found, using defaults");
        return Ok(LoadedConfig {
            config: Config::default().resolve_paths(cwd),
            warnings: Vec::new(),
            source: None,
        });
    };

    debug!(path = %path.display(), "loading config");
    let (config, warnings) = load_with_warnings(&path)?;
    let base = path.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.to_path_buf());

    Ok(LoadedConfig {
        config: config.resolve_paths(&base),
        warnings,
        source: Some(path),
    })
}

/// Apply environment variable overrides (SELFDEPLOY_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |key| std::env::var(key).ok())
}

pub(crate) fn apply_overrides(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    // SELFDEPLOY_ENV
    if let Some(env) = var("SELFDEPLOY_ENV").filter(|v| !v.is_empty()) {
        config.default_environment = Some(env);
    }

    // SELFDEPLOY_SERVER_KEY
    if let Some(key) = var("SELFDEPLOY_SERVER_KEY").filter(|v| !v.is_empty()) {
        config.server_key = Some(key);
    }

    // SELFDEPLOY_EXECUTION_MODE
    if let Some(mode) = var("SELFDEPLOY_EXECUTION_MODE") {
        match ExecutionMode::parse(&mode) {
            Some(mode) => config.execution.mode = mode,
            None => warn!(value = %mode, "ignoring unknown SELFDEPLOY_EXECUTION_MODE"),
        }
    }

    // SELFDEPLOY_USER
    if let Some(user) = var("SELFDEPLOY_USER").filter(|v| !v.is_empty()) {
        config.systemd.user = Some(user);
    }

    config
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const KNOWN_KEYS: &[&str] = &[
        "log_dir",
        "templates_path",
        "scripts_path",
        "working_directory",
        "default_environment",
        "server_key",
        "remote_command",
        "execution",
        "mode",
        "privileged",
        "grace_seconds",
        "systemd",
        "nice",
        "io_scheduling_class",
        "io_scheduling_priority",
        "collect",
        "user",
        "env",
        "environments",
    ];

    KNOWN_KEYS
        .iter()
        .map(|candidate| (*candidate, edit_distance(unknown, candidate)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
        .map(|(candidate, _)| candidate.to_string())
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ac) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, bc) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = (above + 1)
                .min(row[j] + 1)
                .min(diagonal + usize::from(ac != *bc));
            diagonal = above;
        }
    }

    row[b.len()]
}
