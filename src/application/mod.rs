//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `ScriptPublisher` - Render deployment targets into executable scripts
//! - `ScriptExecutor` - Discover scripts and launch them through a strategy
//! - `RemoteTrigger` - Run the executor on remote hosts over SSH
//! - `scaffold_fragment` - Write a starter fragment for a deployment

pub mod execute;
pub mod publish;
pub mod remote;
pub mod scaffold;

pub use execute::{RunReport, ScriptExecutor};
pub use publish::{PublishReport, PublishRequest, PublishResult, ScriptPublisher, Selection};
pub use remote::{remote_commands, RemoteCommand, RemoteReport, RemoteResult, RemoteTrigger};
pub use scaffold::{scaffold_fragment, starter_fragment};
