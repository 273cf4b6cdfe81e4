//! Domain Entities
//!
//! - `Environment` - A named group of deployment targets plus remote metadata
//! - `DeploymentTarget` - Single-server or multi-server variable sets
//! - `RenderedScript` - Script text ready to be written
//! - `ExecutionTarget` - A script discovered in the scripts directory

mod deployment;
mod script;

pub use deployment::{DeploymentTarget, Environment, Variables, RESERVED_SERVER_KEY};
pub use script::{ExecutionTarget, RenderedScript, SCRIPT_EXTENSION};
