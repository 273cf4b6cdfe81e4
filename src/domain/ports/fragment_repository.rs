//! FragmentRepository port - lookup of deployment-specific template fragments
//!
//! Implementations:
//! - `FsFragmentRepository` - `{dir}/{name}.sh.tmpl` files
//! - `HashMap<String, String>` - in-memory, for tests and embedding

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

/// Registered fragments, addressed by template name
pub trait FragmentRepository {
    /// Fragment source for `name`, or `None` when none is registered
    fn find(&self, name: &str) -> io::Result<Option<String>>;

    /// Where fragments are looked up (for error messages)
    fn location(&self) -> PathBuf;
}

impl FragmentRepository for HashMap<String, String> {
    fn find(&self, name: &str) -> io::Result<Option<String>> {
        Ok(self.get(name).cloned())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("<memory>")
    }
}
