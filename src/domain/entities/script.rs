//! Rendered and discovered deployment scripts

use std::path::{Path, PathBuf};

/// Extension of every script the publisher writes and the executor runs
pub const SCRIPT_EXTENSION: &str = "sh";

/// Output of rendering one (deployment, optional server) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedScript {
    /// `deployment` or `deployment-server`
    pub name: String,
    /// Fragment name the body was resolved from
    pub template: String,
    pub content: String,
}

impl RenderedScript {
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, SCRIPT_EXTENSION)
    }
}

/// A script found in the scripts directory at run time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionTarget {
    /// File name, e.g. `app-production.sh`
    pub name: String,
    /// Absolute path
    pub path: PathBuf,
}

impl ExecutionTarget {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// File name without the `.sh` extension
    pub fn stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }
}
