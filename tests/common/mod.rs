//! Common test utilities for selfdeploy CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project directory, home directory and fake tools
//! - Assertion helpers: `wait_for_file`, `list_all_files`
//! - Fixtures: Reusable configuration and fragment text

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;
