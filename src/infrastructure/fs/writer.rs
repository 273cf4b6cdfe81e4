//! Executable script writes

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::domain::entities::RenderedScript;
use crate::error::SelfDeployResult;

/// Mode applied to every written script
pub const SCRIPT_MODE: u32 = 0o755;

/// Writes rendered scripts into the scripts directory
#[derive(Debug, Clone)]
pub struct ScriptWriter {
    dir: PathBuf,
}

impl ScriptWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `{dir}/{name}.sh`, replacing any previous version.
    ///
    /// The file is written to a temporary sibling and renamed into place, so
    /// a concurrent reader sees either the old or the new script.
    pub fn write(&self, script: &RenderedScript) -> SelfDeployResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(script.file_name());
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(script.content.as_bytes())?;
        tmp.as_file().sync_all()?;
        set_executable(tmp.path())?;
        tmp.persist(&path).map_err(|e| e.error)?;

        Ok(path)
    }
}

#[cfg(unix)]
fn set_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(SCRIPT_MODE))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn script(name: &str, content: &str) -> RenderedScript {
        RenderedScript {
            name: name.to_string(),
            template: name.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn creates_directory_and_writes_script() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join(".deployments");
        let writer = ScriptWriter::new(&out);

        let path = writer.write(&script("app", "#!/usr/bin/env bash\n")).unwrap();

        assert_eq!(path, out.join("app.sh"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "#!/usr/bin/env bash\n");
    }

    #[test]
    fn overwrites_existing_script() {
        let dir = tempdir().unwrap();
        let writer = ScriptWriter::new(dir.path());

        writer.write(&script("app", "old")).unwrap();
        let path = writer.write(&script("app", "new")).unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "new");
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[cfg(unix)]
    #[test]
    fn written_script_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let writer = ScriptWriter::new(dir.path());
        let path = writer.write(&script("app", "echo hi")).unwrap();

        let mode = std::fs::metadata(path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
