//! Directory-backed fragment lookup

use std::io;
use std::path::{Path, PathBuf};

use crate::domain::ports::FragmentRepository;
use crate::infrastructure::template::FRAGMENT_EXTENSION;

/// Reads `{dir}/{name}.sh.tmpl`
#[derive(Debug, Clone)]
pub struct FsFragmentRepository {
    dir: PathBuf,
}

impl FsFragmentRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a fragment for `name` lives at, whether or not it exists
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, FRAGMENT_EXTENSION))
    }
}

impl FragmentRepository for FsFragmentRepository {
    fn find(&self, name: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(name)) {
            Ok(source) => Ok(Some(source)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn location(&self) -> PathBuf {
        self.dir.clone()
    }
}
