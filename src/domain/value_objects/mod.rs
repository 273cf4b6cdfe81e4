//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod command_line;
mod shell;

pub use command_line::CommandLine;
pub use shell::{escape_double_quoted, shell_quote};
