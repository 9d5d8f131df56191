use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};

use crate::batch::{generate_all, BatchSummary};
use crate::client::{ClientSettings, GenerationService, ReqwestGenerationClient};
use crate::document::DocumentStore;
use crate::opener::SystemOpener;
use crate::{ClientError, DocumentError, DocumentRequest, EngineEvent, JobId, SectionRequest};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub client: ClientSettings,
    pub output_dir: PathBuf,
    pub open_documents: bool,
}

impl EngineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            client: ClientSettings::default(),
            output_dir,
            open_documents: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid client settings: {0}")]
    Client(#[from] ClientError),
    #[error("could not start async runtime: {0}")]
    Runtime(std::io::Error),
    #[error("could not spawn engine thread: {0}")]
    Thread(std::io::Error),
}

enum EngineCommand {
    GenerateSection {
        job_id: JobId,
        request: SectionRequest,
    },
    GenerateAll {
        jobs: Vec<(JobId, SectionRequest)>,
    },
    FetchImages {
        location: String,
    },
    Download {
        request: DocumentRequest,
    },
}

/// Runs requests on a dedicated thread with its own tokio runtime.
///
/// Commands return immediately; results arrive as [`EngineEvent`]s. Every
/// command runs as an independent task, so nothing bounds how many requests
/// are in flight and none of them can be cancelled.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let client = ReqwestGenerationClient::new(config.client)?;
        let opener: Option<Arc<dyn crate::DocumentOpener>> = if config.open_documents {
            Some(Arc::new(SystemOpener))
        } else {
            None
        };
        let documents = DocumentStore::new(config.output_dir, opener);
        Self::with_service(Arc::new(client), documents)
    }

    pub fn with_service(
        service: Arc<dyn GenerationService>,
        documents: DocumentStore,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(EngineError::Runtime)?;
        let documents = Arc::new(documents);

        thread::Builder::new()
            .name("blog-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let service = service.clone();
                    let documents = documents.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(service.as_ref(), &documents, command, event_tx).await;
                    });
                }
            })
            .map_err(EngineError::Thread)?;

        Ok(Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        })
    }

    pub fn generate_section(&self, job_id: JobId, request: SectionRequest) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::GenerateSection { job_id, request });
    }

    pub fn generate_all(&self, jobs: Vec<(JobId, SectionRequest)>) {
        let _ = self.cmd_tx.send(EngineCommand::GenerateAll { jobs });
    }

    pub fn fetch_images(&self, location: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchImages {
            location: location.into(),
        });
    }

    pub fn download(&self, request: DocumentRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Download { request });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Fails with `Disconnected` once the engine thread is gone.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, mpsc::RecvTimeoutError> {
        self.event_rx
            .lock()
            .map_err(|_| mpsc::RecvTimeoutError::Disconnected)?
            .recv_timeout(timeout)
    }
}

async fn handle_command(
    service: &dyn GenerationService,
    documents: &DocumentStore,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::GenerateSection { job_id, request } => {
            engine_info!(
                "GenerateSection job_id={} model={} section={:?}",
                job_id,
                request.model,
                request.section
            );
            let result = service.generate_section(&request).await;
            if let Err(err) = &result {
                engine_warn!("Section job {} failed: {}", job_id, err);
            }
            let _ = event_tx.send(EngineEvent::SectionCompleted { job_id, result });
        }
        EngineCommand::GenerateAll { jobs } => {
            let (job_ids, requests): (Vec<JobId>, Vec<SectionRequest>) = jobs.into_iter().unzip();
            engine_info!("GenerateAll sections={}", requests.len());
            let results = generate_all(service, &requests, |index, result| {
                let job_id = job_ids[index];
                if let Err(err) = result {
                    engine_warn!("Section job {} failed: {}", job_id, err);
                }
                let _ = event_tx.send(EngineEvent::SectionCompleted {
                    job_id,
                    result: result.clone(),
                });
            })
            .await;
            let summary = BatchSummary::from_results(&results);
            engine_info!(
                "GenerateAll settled: succeeded={} failed={}",
                summary.succeeded,
                summary.failed
            );
            let _ = event_tx.send(EngineEvent::BatchSettled(summary));
        }
        EngineCommand::FetchImages { location } => {
            engine_info!("FetchImages location={:?}", location);
            let result = service.search_images(&location).await;
            if let Err(err) = &result {
                engine_warn!("Image search failed: {}", err);
            }
            let _ = event_tx.send(EngineEvent::ImagesCompleted(result));
        }
        EngineCommand::Download { request } => {
            engine_info!(
                "Download title={:?} sections={}",
                request.title,
                request.body.len()
            );
            let result = download(service, documents, &request).await;
            if let Err(err) = &result {
                engine_warn!("Download failed: {}", err);
            }
            let _ = event_tx.send(EngineEvent::DocumentCompleted(result));
        }
    }
}

async fn download(
    service: &dyn GenerationService,
    documents: &DocumentStore,
    request: &DocumentRequest,
) -> Result<crate::SavedDocument, DocumentError> {
    let payload = service.render_document(request).await?;
    documents
        .save(&request.title, &payload)
        .map_err(|err| DocumentError::Persist(err.to_string()))
}
