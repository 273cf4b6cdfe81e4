//! Configuration module for selfdeploy
//!
//! Lookup order (first hit wins):
//! 1. `--config <path>`
//! 2. `SELFDEPLOY_CONFIG`
//! 3. `./selfdeploy.toml`
//! 4. `<user config dir>/selfdeploy/config.toml`
//! 5. Built-in defaults
//!
//! `SELFDEPLOY_*` environment variables are applied on top of whichever was
//! loaded.

mod loader;
mod types;

pub use loader::{
    discover_in, ConfigWarning, LoadedConfig, CONFIG_ENV_VAR, PROJECT_CONFIG_FILE,
};
pub use types::{Config, ExecutionConfig, ExecutionMode, IoSchedulingClass, SystemdConfig};
