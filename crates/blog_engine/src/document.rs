use std::path::{Path, PathBuf};
use std::sync::Arc;

use engine_logging::{engine_info, engine_warn};

use crate::filename::document_filename;
use crate::persist::{DocumentWriter, PersistError};
use crate::{DocumentOpener, DocumentPayload, SavedDocument};

/// Where rendered documents land, and who opens them afterwards.
#[derive(Clone)]
pub struct DocumentStore {
    output_dir: PathBuf,
    opener: Option<Arc<dyn DocumentOpener>>,
}

impl DocumentStore {
    pub fn new(output_dir: PathBuf, opener: Option<Arc<dyn DocumentOpener>>) -> Self {
        Self { output_dir, opener }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes the payload and opens it. Saved files are never removed.
    pub fn save(&self, title: &str, payload: &DocumentPayload) -> Result<SavedDocument, PersistError> {
        let filename = document_filename(title, &payload.bytes, payload.content_type.as_deref());
        let writer = DocumentWriter::new(self.output_dir.clone());
        let path = writer.write_document(&filename, &payload.bytes)?;
        engine_info!("Saved document {:?} ({} bytes)", path, payload.bytes.len());

        let opened = match &self.opener {
            Some(opener) => match opener.open(&path) {
                Ok(()) => true,
                Err(err) => {
                    engine_warn!("Could not open {:?}: {}", path, err);
                    false
                }
            },
            None => false,
        };

        Ok(SavedDocument { path, opened })
    }
}
