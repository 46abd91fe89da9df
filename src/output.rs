//! Persistence of rendered documents.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use tempfile::NamedTempFile;

use crate::error::PersistError;

/// Mode of saved documents on Unix: readable by everyone, writable by the owner.
#[cfg(unix)]
const SAVED_FILE_MODE: u32 = 0o644;

/// Directory that receives generated documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputDirectory {
    root: PathBuf,
}

impl OutputDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `bytes` as `file_name`, creating the directory when needed.
    ///
    /// The bytes go to a temporary file in the same directory which is then
    /// renamed over the target, so readers see either the previous file or the
    /// complete new one. An existing file is replaced. On Unix the saved file
    /// is made world readable (`0644`).
    pub fn persist(&self, bytes: &[u8], file_name: &str) -> Result<PathBuf, PersistError> {
        fs::create_dir_all(&self.root).map_err(|source| PersistError::CreateDir {
            path: self.root.clone(),
            source,
        })?;

        let target = self.root.join(file_name);
        let write_error = |source| PersistError::Write {
            path: target.clone(),
            source,
        };

        let mut staged = NamedTempFile::new_in(&self.root).map_err(write_error)?;
        staged.write_all(bytes).map_err(write_error)?;
        staged.flush().map_err(write_error)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            staged
                .as_file()
                .set_permissions(fs::Permissions::from_mode(SAVED_FILE_MODE))
                .map_err(write_error)?;
        }
        staged
            .persist(&target)
            .map_err(|err| write_error(err.error))?;

        info!("wrote {} bytes to {}", bytes.len(), target.display());
        Ok(target)
    }
}

impl Default for OutputDirectory {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_OUTPUT_DIR)
    }
}
