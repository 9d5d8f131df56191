//! Blog engine: remote generation client, document persistence and effect execution.
mod batch;
mod client;
mod document;
mod engine;
mod filename;
mod opener;
mod persist;
mod types;

pub use batch::{generate_all, BatchSummary};
pub use client::{ClientSettings, GenerationService, ReqwestGenerationClient};
pub use document::DocumentStore;
pub use engine::{EngineConfig, EngineError, EngineHandle};
pub use filename::{document_filename, extension_for_content_type};
pub use opener::{DocumentOpener, SystemOpener};
pub use persist::{ensure_document_dir, DocumentWriter, PersistError};
pub use types::{
    ClientError, DocumentError, DocumentPayload, DocumentRequest, EngineEvent, FailureKind,
    ImageGroups, JobId, SavedDocument, SectionRequest,
};
