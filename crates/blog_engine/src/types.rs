use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::batch::BatchSummary;

/// Identifies one section request across the engine boundary.
pub type JobId = u64;

/// Image URLs grouped the way the image search returns them.
pub type ImageGroups = Vec<Vec<String>>;

/// Body of `POST /{model}`; the model selects the route and is not sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionRequest {
    #[serde(skip)]
    pub model: String,
    pub title: String,
    pub section: String,
}

/// Body of `POST /generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequest {
    pub title: String,
    /// `[section title, section body or null]` pairs in section order.
    pub body: Vec<(String, Option<String>)>,
    pub image_links: ImageGroups,
}

/// Raw document returned by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPayload {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDocument {
    pub path: PathBuf,
    /// False when the platform viewer could not be launched or opening is disabled.
    pub opened: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SectionCompleted {
        job_id: JobId,
        /// `Ok(None)` when the service answered `null`.
        result: Result<Option<String>, ClientError>,
    },
    /// Every section of one batch has settled.
    BatchSettled(BatchSummary),
    ImagesCompleted(Result<ImageGroups, ClientError>),
    DocumentCompleted(Result<SavedDocument, DocumentError>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ClientError {
    pub kind: FailureKind,
    pub message: String,
}

impl ClientError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    InvalidHeader,
    HttpStatus(u16),
    Timeout,
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::InvalidHeader => write!(f, "invalid header"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "invalid response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("document request failed: {0}")]
    Client(#[from] ClientError),
    #[error("could not save document: {0}")]
    Persist(String),
}
