//! Error types for selfdeploy
//!
//! Library code returns `SelfDeployError`; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for selfdeploy operations
pub type SelfDeployResult<T> = Result<T, SelfDeployError>;

/// Main error type for selfdeploy operations
#[derive(Error, Debug)]
pub enum SelfDeployError {
    /// Environment name absent from configuration
    #[error("environment [{environment}] not found in config")]
    EnvironmentNotFound { environment: String },

    /// Environment exists but declares no deployment targets
    #[error("no deployments found for environment [{environment}]")]
    NoDeployments { environment: String },

    /// Deployment name absent from its environment
    #[error("deployment [{deployment}] not found in environment [{environment}]")]
    DeploymentNotFound {
        environment: String,
        deployment: String,
    },

    /// Server slot absent from a multi-server deployment
    #[error("server [{server}] not configured for deployment [{deployment}]")]
    ServerNotFound { deployment: String, server: String },

    /// A target declares the protected server-key variable
    #[error("deployment [{deployment}] declares reserved variable '{name}'")]
    ReservedVariableName { deployment: String, name: String },

    /// A target table mixes plain variables and server tables
    #[error("deployment [{deployment}] is malformed: {reason}")]
    MalformedDeployment { deployment: String, reason: String },

    /// Configuration file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// No fragment registered for a template name
    #[error("template [{template}] not found in {directory}")]
    TemplateNotFound { template: String, directory: PathBuf },

    /// Fragment references a variable the deployment does not define
    #[error("template [{template}] references undefined variable '{variable}'")]
    MissingVariable { template: String, variable: String },

    /// Scripts directory unset or missing at run time
    #[error("deployment scripts path not configured or does not exist: {}", display_opt(.path))]
    ScriptsPathInvalid { path: Option<PathBuf> },

    /// Launcher process exited nonzero or could not be started
    #[error("failed to launch {script}: {reason} (command: {command})")]
    LaunchFailed {
        script: String,
        command: String,
        reason: String,
    },

    /// Scaffold target already exists and overwrite was not requested
    #[error("fragment {path} already exists")]
    FragmentExists { path: PathBuf },

    /// Remote trigger metadata missing for an environment
    #[error("no [{field}] configured for environment [{environment}]")]
    RemoteNotConfigured { environment: String, field: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn display_opt(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}
