use std::{future::Future, time::Duration};

use domain_workflow::exception::{WorkflowException, WorkflowResult};
use rand::Rng;

use crate::config::OrchestratorConfig;

/// Run an allocate-and-insert operation, transparently retrying the whole
/// operation on `AllocationConflict` with a short jittered backoff. The
/// conflict surfaces to the caller only once attempts are exhausted; a
/// sequence value is never reused.
pub(crate) async fn with_allocation_retry<T, F, Fut>(
    config: &OrchestratorConfig,
    op: F,
) -> WorkflowResult<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = WorkflowResult<T>>,
{
    let max_attempts = config.max_allocation_retries.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Err(WorkflowException::AllocationConflict { scope }) if attempt < max_attempts => {
                tracing::warn!(%scope, attempt, "sequence allocation conflict, retrying");
                let backoff = rand::thread_rng().gen_range(1..=config.retry_backoff_ms.max(1));
                tokio::time::sleep(Duration::from_millis(backoff)).await;
            }
            result => return result,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn conflict() -> WorkflowException {
        WorkflowException::AllocationConflict { scope: "callout".into() }
    }

    #[tokio::test]
    async fn surfaces_conflict_once_attempts_are_exhausted() {
        let config = OrchestratorConfig { max_allocation_retries: 3, retry_backoff_ms: 1 };
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: WorkflowResult<u32> = with_allocation_retry(&config, move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(conflict())
        })
        .await;
        assert!(matches!(result, Err(WorkflowException::AllocationConflict { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn returns_the_first_success() {
        let config = OrchestratorConfig { retry_backoff_ms: 1, ..Default::default() };
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result = with_allocation_retry(&config, move || async move {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(conflict())
            } else {
                Ok(7u32)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn other_errors_pass_through_untouched() {
        let config = OrchestratorConfig::default();
        let result: WorkflowResult<u32> = with_allocation_retry(&config, || async {
            Err(WorkflowException::EmptyEmployees)
        })
        .await;
        assert!(matches!(result, Err(WorkflowException::EmptyEmployees)));
    }
}
