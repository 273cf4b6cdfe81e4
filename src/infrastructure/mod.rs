//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `template/` - Script rendering (base template + fragment substitution)
//! - `fs/` - Fragment lookup and executable script writes
//! - `process/` - std::process command runner
//! - `launch/` - Launch strategies (background shell, systemd transient unit)
//! - `clock` - System and fixed clocks

pub mod clock;
pub mod fs;
pub mod launch;
pub mod process;
pub mod template;

// Re-export for convenience
pub use clock::{FixedClock, SystemClock};
pub use fs::{FsFragmentRepository, ScriptWriter};
pub use launch::{strategy_for, BackgroundShellLauncher, SystemdUnitLauncher};
pub use process::SystemCommandRunner;
pub use template::{RenderContext, ScriptTemplateRenderer, TemplateRef};
