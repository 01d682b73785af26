// ABOUTME: Dispatch policies for one batch of ready vertices
// ABOUTME: Sequential in-order dispatch or a semaphore-bounded tokio worker pool

use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

use super::error::ExecutionError;
use super::executor::VertexExecutor;

/// How the ready vertices of one traversal step are dispatched.
///
/// Dependent vertices always land in different batches, so ordering between
/// them holds under either policy; ordering between vertices of one batch
/// is only guaranteed by `Sequential`.
#[derive(Debug, Clone, Copy)]
pub enum Processor {
    /// One vertex at a time, in batch order. The baseline strategy.
    Sequential,
    /// Batch vertices run concurrently on a bounded worker pool.
    WorkerPool { max_concurrent: usize },
}

/// Result of dispatching one batch: everything that completed, plus the
/// first failure if any vertex failed.
pub struct BatchOutcome {
    pub completed: Vec<(String, Value)>,
    pub failure: Option<ExecutionError>,
}

impl Processor {
    pub(crate) async fn dispatch(
        &self,
        batch: &[String],
        strategy: &Arc<dyn VertexExecutor>,
    ) -> BatchOutcome {
        match self {
            Processor::Sequential => Self::dispatch_sequential(batch, strategy).await,
            Processor::WorkerPool { max_concurrent } => {
                Self::dispatch_pooled(batch, strategy, *max_concurrent).await
            }
        }
    }

    async fn dispatch_sequential(
        batch: &[String],
        strategy: &Arc<dyn VertexExecutor>,
    ) -> BatchOutcome {
        let mut completed = Vec::with_capacity(batch.len());

        for key in batch {
            debug!("dispatching vertex: {}", key);
            let param = strategy.select_param(key);

            match strategy.execute(param).await {
                Ok(value) => completed.push((key.clone(), value)),
                Err(failure) => {
                    // Remaining batch members are never dispatched
                    return BatchOutcome {
                        completed,
                        failure: Some(failure),
                    };
                }
            }
        }

        BatchOutcome {
            completed,
            failure: None,
        }
    }

    async fn dispatch_pooled(
        batch: &[String],
        strategy: &Arc<dyn VertexExecutor>,
        max_concurrent: usize,
    ) -> BatchOutcome {
        let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));

        let handles: Vec<_> = batch
            .iter()
            .map(|key| {
                let key = key.clone();
                let strategy = Arc::clone(strategy);
                let semaphore = Arc::clone(&semaphore);

                tokio::spawn(async move {
                    let _permit = semaphore
                        .acquire()
                        .await
                        .map_err(|_| ExecutionError::SystemError("Semaphore closed".to_string()))?;

                    debug!("worker dispatching vertex: {}", key);
                    let param = strategy.select_param(&key);
                    let value = strategy.execute(param).await?;

                    Ok::<(String, Value), ExecutionError>((key, value))
                })
            })
            .collect();

        let mut completed = Vec::new();
        let mut failure = None;

        for joined in join_all(handles).await {
            match joined {
                Ok(Ok(pair)) => completed.push(pair),
                Ok(Err(error)) => {
                    if failure.is_none() {
                        failure = Some(error);
                    }
                }
                Err(join_error) => {
                    if failure.is_none() {
                        failure = Some(ExecutionError::JoinError(join_error));
                    }
                }
            }
        }

        BatchOutcome { completed, failure }
    }
}
