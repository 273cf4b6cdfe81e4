//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod clock;
pub mod command_runner;
pub mod fragment_repository;
pub mod launch_strategy;

pub use clock::Clock;
pub use command_runner::{CommandOutput, CommandRunner};
pub use fragment_repository::FragmentRepository;
pub use launch_strategy::{LaunchContext, LaunchOutcome, LaunchStatus, LaunchStrategy};
