//! File System Implementations
//!
//! - `FsFragmentRepository` - fragment lookup in the templates directory
//! - `ScriptWriter` - atomic, executable writes into the scripts directory

mod fragments;
mod writer;

pub use fragments::FsFragmentRepository;
pub use writer::ScriptWriter;
