//! Domain Layer
//!
//! Deployment targets, script values and the traits infrastructure plugs into.
//!
//! ## Structure
//!
//! - `entities/` - Environments, deployment targets, rendered and discovered scripts
//! - `value_objects/` - Immutable value types (CommandLine, shell quoting)
//! - `services/` - Domain services (DeploymentRegistry)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or spawns processes
//! 2. **Ports & Adapters** - Fragments, processes and time go through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
