use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot use {path:?} as the document directory: {reason}")]
    DocumentDir { path: PathBuf, reason: String },
    #[error("could not write document: {0}")]
    Io(#[from] io::Error),
}

/// Creates the document directory on first use. An existing non-directory
/// at `dir` is an error.
pub fn ensure_document_dir(dir: &Path) -> Result<(), PersistError> {
    let dir_error = |reason: String| PersistError::DocumentDir {
        path: dir.to_path_buf(),
        reason,
    };
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(dir_error("not a directory".to_string())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|err| dir_error(err.to_string()))
        }
        Err(err) => Err(dir_error(err.to_string())),
    }
}

/// Saves rendered documents so the viewer never opens a half-written file.
pub struct DocumentWriter {
    dir: PathBuf,
}

impl DocumentWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Writes `bytes` to `{dir}/{filename}` through a sibling temp file,
    /// replacing any earlier download of the same document.
    pub fn write_document(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_document_dir(&self.dir)?;

        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(bytes)?;
        staged.as_file_mut().sync_all()?;

        let target = self.dir.join(filename);
        // `persist` cannot replace an existing file on every platform.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        staged.persist(&target).map_err(|err| PersistError::Io(err.error))?;
        Ok(target)
    }
}
