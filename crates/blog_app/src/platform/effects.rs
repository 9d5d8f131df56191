use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use blog_core::{DocumentJob, Effect, Msg, SectionJob};
use blog_engine::{
    DocumentRequest, EngineConfig, EngineError, EngineEvent, EngineHandle, JobId, SectionRequest,
};
use engine_logging::{engine_debug, engine_info, engine_warn};

use super::app::AppEvent;

/// Executes core effects on the engine and feeds engine events back as messages.
pub(crate) struct EffectRunner {
    engine: Arc<EngineHandle>,
}

impl EffectRunner {
    pub fn new(config: EngineConfig, event_tx: mpsc::Sender<AppEvent>) -> Result<Self, EngineError> {
        let engine = Arc::new(EngineHandle::new(config)?);
        let runner = Self { engine };
        runner.spawn_event_loop(event_tx);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::GenerateSection(job) => {
                    engine_info!("GenerateSection index={} ticket={}", job.index, job.ticket);
                    let (job_id, request) = section_request(job);
                    self.engine.generate_section(job_id, request);
                }
                Effect::GenerateAll { jobs } => {
                    engine_info!("GenerateAll jobs={}", jobs.len());
                    self.engine
                        .generate_all(jobs.into_iter().map(section_request).collect());
                }
                Effect::FetchImages { location } => {
                    self.engine.fetch_images(location);
                }
                Effect::DownloadDocument(job) => {
                    self.engine.download(document_request(job));
                }
            }
        }
    }

    fn spawn_event_loop(&self, event_tx: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || {
            forward_events(|| engine.recv_timeout(Duration::from_millis(200)), &event_tx);
        });
    }
}

/// Pumps engine events into the app channel until either side goes away.
fn forward_events<R>(mut recv: R, event_tx: &mpsc::Sender<AppEvent>)
where
    R: FnMut() -> Result<EngineEvent, mpsc::RecvTimeoutError>,
{
    loop {
        let event = match recv() {
            Ok(event) => event,
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                engine_warn!("Engine event channel closed");
                break;
            }
        };
        engine_debug!("Engine event {:?}", event);
        if event_tx.send(AppEvent::Core(map_event(event))).is_err() {
            break;
        }
    }
}

fn section_request(job: SectionJob) -> (JobId, SectionRequest) {
    (
        job.ticket,
        SectionRequest {
            model: job.model,
            title: job.blog_title,
            section: job.section_title,
        },
    )
}

fn document_request(job: DocumentJob) -> DocumentRequest {
    DocumentRequest {
        title: job.title,
        body: job.body,
        image_links: job.image_links,
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SectionCompleted { job_id, result } => Msg::SectionGenerated {
            ticket: job_id,
            result: result.map_err(|err| err.to_string()),
        },
        EngineEvent::BatchSettled(summary) => Msg::BatchSettled {
            succeeded: summary.succeeded,
            failed: summary.failed,
        },
        EngineEvent::ImagesCompleted(result) => {
            Msg::ImagesFetched(result.map_err(|err| err.to_string()))
        }
        EngineEvent::DocumentCompleted(result) => Msg::DocumentSaved(
            result
                .map(|saved| saved.path.display().to_string())
                .map_err(|err| err.to_string()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use blog_engine::{BatchSummary, ClientError, DocumentError, FailureKind, SavedDocument};

    #[test]
    fn section_job_becomes_request_keyed_by_ticket() {
        let (job_id, request) = section_request(SectionJob {
            index: 3,
            ticket: 42,
            model: "gpt".to_string(),
            blog_title: "Goa".to_string(),
            section_title: "Food".to_string(),
        });

        assert_eq!(job_id, 42);
        assert_eq!(
            request,
            SectionRequest {
                model: "gpt".to_string(),
                title: "Goa".to_string(),
                section: "Food".to_string(),
            }
        );
    }

    #[test]
    fn engine_events_become_messages() {
        let failure = ClientError {
            kind: FailureKind::HttpStatus(500),
            message: "500 Internal Server Error".to_string(),
        };
        assert_eq!(
            map_event(EngineEvent::SectionCompleted {
                job_id: 7,
                result: Err(failure.clone()),
            }),
            Msg::SectionGenerated {
                ticket: 7,
                result: Err("http status 500: 500 Internal Server Error".to_string()),
            }
        );
        assert_eq!(
            map_event(EngineEvent::BatchSettled(BatchSummary {
                succeeded: 2,
                failed: 1
            })),
            Msg::BatchSettled {
                succeeded: 2,
                failed: 1
            }
        );
        assert_eq!(
            map_event(EngineEvent::DocumentCompleted(Ok(SavedDocument {
                path: PathBuf::from("output").join("Goa--00ff00ff.pdf"),
                opened: true,
            }))),
            Msg::DocumentSaved(Ok(PathBuf::from("output")
                .join("Goa--00ff00ff.pdf")
                .display()
                .to_string()))
        );
        assert_eq!(
            map_event(EngineEvent::DocumentCompleted(Err(DocumentError::Client(
                failure
            )))),
            Msg::DocumentSaved(Err(
                "document request failed: http status 500: 500 Internal Server Error".to_string()
            ))
        );
    }

    #[test]
    fn event_forwarding_stops_when_engine_disconnects() {
        let mut pending = vec![
            Ok(EngineEvent::BatchSettled(BatchSummary::default())),
            Err(mpsc::RecvTimeoutError::Timeout),
            Err(mpsc::RecvTimeoutError::Disconnected),
        ]
        .into_iter();
        let (event_tx, event_rx) = mpsc::channel();

        forward_events(
            || pending.next().unwrap_or(Err(mpsc::RecvTimeoutError::Disconnected)),
            &event_tx,
        );

        assert_eq!(pending.len(), 0);
        let forwarded: Vec<AppEvent> = event_rx.try_iter().collect();
        assert_eq!(forwarded.len(), 1);
        assert!(matches!(
            &forwarded[0],
            AppEvent::Core(Msg::BatchSettled {
                succeeded: 0,
                failed: 0
            })
        ));
    }

    #[test]
    fn null_section_body_maps_to_absent_content() {
        assert_eq!(
            map_event(EngineEvent::SectionCompleted {
                job_id: 3,
                result: Ok(None),
            }),
            Msg::SectionGenerated {
                ticket: 3,
                result: Ok(None),
            }
        );
    }

    #[test]
    fn document_job_keeps_null_bodies() {
        let request = document_request(DocumentJob {
            title: "Goa".to_string(),
            body: vec![("Beaches".to_string(), None)],
            image_links: vec![vec!["a.jpg".to_string()]],
        });

        assert_eq!(request.body, vec![("Beaches".to_string(), None)]);
        assert_eq!(request.image_links, vec![vec!["a.jpg".to_string()]]);
    }
}
