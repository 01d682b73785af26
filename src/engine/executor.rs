// ABOUTME: Topological graph execution with a pluggable vertex strategy
// ABOUTME: Dispatches ready batches, persists results, and aborts on first failure

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

use super::error::{ExecutionError, Result};
use super::processor::Processor;
use super::state::RunState;
use crate::graph::TaskGraph;
use crate::registry::Scope;
use crate::template::TitleEngine;

/// Execution strategy invoked for each graph vertex.
#[async_trait]
pub trait VertexExecutor: Send + Sync {
    /// Derive the value handed to [`VertexExecutor::execute`] for a vertex.
    fn select_param(&self, vertex: &str) -> String;

    /// Execute one unit of work; the return value becomes the vertex result.
    async fn execute(&self, param: String) -> Result<Value>;

    /// Persist the results of the vertices that completed in the current
    /// traversal step.
    async fn on_batch_complete(&self, results: &[(String, Value)]) -> Result<()>;
}

/// Production strategy: resolves task descriptors from a [`Scope`], renders
/// titles, and writes results back through the completion hook.
pub struct TaskExecutor {
    scope: Scope,
    titles: TitleEngine,
}

impl TaskExecutor {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            titles: TitleEngine::new(),
        }
    }
}

#[async_trait]
impl VertexExecutor for TaskExecutor {
    fn select_param(&self, vertex: &str) -> String {
        // The vertex label is the task key
        vertex.to_string()
    }

    async fn execute(&self, param: String) -> Result<Value> {
        let descriptor = self.scope.task(&param).await?;

        let title = self.titles.render_title(&descriptor)?;
        if title != descriptor.title {
            self.scope.set_task_title(&param, title.clone()).await?;
        }

        info!("`{}::{}` is executing", title, param);

        descriptor
            .invoke()
            .map_err(|source| ExecutionError::TaskFailed { key: param, source })
    }

    async fn on_batch_complete(&self, results: &[(String, Value)]) -> Result<()> {
        for (key, value) in results {
            self.scope.set_task_result(key, value.clone()).await?;
        }
        Ok(())
    }
}

/// Traverses a task graph in topological batches.
pub struct GraphExecutor;

impl GraphExecutor {
    /// Execute every vertex of `graph` through `strategy`, dispatching each
    /// ready batch per `processor`.
    ///
    /// A vertex is only dispatched once all of its predecessors completed.
    /// On the first vertex failure the run aborts: completed results are
    /// persisted through the completion hook before the error propagates,
    /// and no further batches are dispatched. Returns the completed keys
    /// in execution order.
    pub async fn run(
        graph: &TaskGraph,
        processor: Processor,
        strategy: Arc<dyn VertexExecutor>,
    ) -> Result<Vec<String>> {
        let plan = graph.execution_plan()?;

        info!(
            "execution plan: {} batches, {} vertices, max parallelism {}",
            plan.execution_depth(),
            plan.total_vertices,
            plan.max_parallelism()
        );

        let keys = plan.keys();
        let mut state = RunState::new(&keys);
        state.mark_started();

        for task_batch in &plan.batches {
            for key in task_batch {
                state.mark_vertex_started(key);
            }

            let outcome = processor.dispatch(task_batch, &strategy).await;

            for (key, _) in &outcome.completed {
                state.mark_vertex_completed(key);
            }
            strategy.on_batch_complete(&outcome.completed).await?;

            if let Some(failure) = outcome.failure {
                if let ExecutionError::TaskFailed { key, .. } = &failure {
                    state.mark_vertex_failed(key);
                }
                state.mark_failed();

                error!("run aborted after {} completed vertices: {}",
                    state.completed_order().len(),
                    failure
                );
                return Err(failure);
            }
        }

        state.mark_completed();
        info!("run completed: {} vertices", state.completed_order().len());

        Ok(state.completed_order().to_vec())
    }
}
