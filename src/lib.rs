//! selfdeploy - per-environment deployment scripts, launched in the background
//!
//! selfdeploy renders one executable shell script per deployment target from
//! a TOML configuration and a directory of body fragments, then launches
//! every rendered script as detached work: a background `bash` job or a
//! `systemd-run` transient unit.
//!
//! ## Layers
//!
//! - `domain` - Deployment targets, scripts and the ports infrastructure implements
//! - `application` - Publish, run, remote trigger and scaffold use cases
//! - `infrastructure` - Template rendering, file system, processes, launchers
//! - `config` - Configuration discovery and loading

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{PublishReport, PublishRequest, RunReport, ScriptExecutor, ScriptPublisher, Selection};
pub use config::{Config, ExecutionMode};
pub use error::{SelfDeployError, SelfDeployResult};
