use futures_util::future::join_all;

use crate::{ClientError, GenerationService, SectionRequest};

/// Settlement counts for one batch of section requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results<T>(results: &[Result<T, ClientError>]) -> Self {
        let succeeded = results.iter().filter(|result| result.is_ok()).count();
        Self {
            succeeded,
            failed: results.len() - succeeded,
        }
    }
}

/// Runs every request concurrently and waits until all of them have settled.
///
/// `on_settled` is invoked with the request's position as soon as that request
/// finishes, in completion order. The returned results are in request order
/// regardless of completion order, and a failure never short-circuits the rest.
pub async fn generate_all<F>(
    service: &dyn GenerationService,
    requests: &[SectionRequest],
    on_settled: F,
) -> Vec<Result<Option<String>, ClientError>>
where
    F: Fn(usize, &Result<Option<String>, ClientError>) + Sync,
{
    let on_settled = &on_settled;
    let tasks = requests.iter().enumerate().map(|(index, request)| async move {
        let result = service.generate_section(request).await;
        on_settled(index, &result);
        result
    });
    join_all(tasks).await
}
