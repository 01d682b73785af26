// ABOUTME: Run entrypoints pairing callables with parameters under one scope
// ABOUTME: Expands groups into the shared register, build-graph, execute pipeline

use std::sync::Arc;
use tracing::{debug, instrument};

use super::error::{ExecutionError, Result};
use super::executor::{GraphExecutor, TaskExecutor};
use super::processor::Processor;
use crate::graph::TaskGraph;
use crate::registry::{RegistryEntry, Scope};
use crate::task::{TaskCallable, TaskDescriptor, TaskParams};

/// Entry point for task and group runs against one scope.
#[derive(Debug, Clone)]
pub struct Runner {
    scope: Scope,
    processor: Processor,
}

impl Runner {
    /// Create a runner with the baseline sequential dispatch policy.
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            processor: Processor::Sequential,
        }
    }

    /// Replace the dispatch policy.
    pub fn with_processor(mut self, processor: Processor) -> Self {
        self.processor = processor;
        self
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Run an ordered list of (callable, params) pairs under one run id.
    ///
    /// Sequence ids are position indices; titles come from the scope's
    /// title table or default to the callable name. All registration
    /// happens before any execution, so a duplicate key fails the run
    /// up front. Returns the task keys in execution order.
    #[instrument(skip(self, pairs), fields(run_id = %run_id, tasks = pairs.len()))]
    pub async fn run_tasks(
        &self,
        pairs: Vec<(TaskCallable, TaskParams)>,
        run_id: &str,
    ) -> Result<Vec<String>> {
        if pairs.is_empty() {
            return Err(ExecutionError::EmptyTaskList);
        }

        let mut keys = Vec::with_capacity(pairs.len());
        for (index, (callable, params)) in pairs.into_iter().enumerate() {
            let title = self.scope.title(callable.name()).await;
            let descriptor =
                TaskDescriptor::new(callable, params, run_id, index.to_string(), title)?;

            keys.push(descriptor.key().to_string());
            self.scope.add(RegistryEntry::Task(descriptor)).await?;
        }

        debug!("registered {} tasks for run", keys.len());

        let graph = TaskGraph::chain(&keys)?;
        let strategy = Arc::new(TaskExecutor::new(self.scope.clone()));

        GraphExecutor::run(&graph, self.processor, strategy).await
    }

    /// Run a registered group under its id.
    ///
    /// Members are paired with parameter mappings by position; positions
    /// past the end of `params` run with empty parameters.
    #[instrument(skip(self, params), fields(group_id = %group_id))]
    pub async fn run_group(
        &self,
        group_id: &str,
        params: Vec<TaskParams>,
    ) -> Result<Vec<String>> {
        let members = self.scope.group(group_id).await?;

        let mut params = params.into_iter();
        let pairs: Vec<(TaskCallable, TaskParams)> = members
            .into_iter()
            .map(|member| (member, params.next().unwrap_or_default()))
            .collect();

        self.run_tasks(pairs, group_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn constant(name: &str, value: i64) -> TaskCallable {
        TaskCallable::new(name, move |_: &TaskParams| Ok(json!(value))).unwrap()
    }

    #[tokio::test]
    async fn test_run_tasks_returns_keys_in_input_order() {
        let runner = Runner::new(Scope::new());

        let keys = runner
            .run_tasks(
                vec![
                    (constant("first", 1), TaskParams::new()),
                    (constant("second", 2), TaskParams::new()),
                    (constant("third", 3), TaskParams::new()),
                ],
                "",
            )
            .await
            .unwrap();

        assert_eq!(keys, vec!["first.0", "second.1", "third.2"]);
    }

    #[tokio::test]
    async fn test_run_id_lands_in_keys() {
        let runner = Runner::new(Scope::new());

        let keys = runner
            .run_tasks(vec![(constant("only", 1), TaskParams::new())], "release")
            .await
            .unwrap();

        assert_eq!(keys, vec!["only.0.release"]);
    }

    #[tokio::test]
    async fn test_empty_task_list_rejected() {
        let runner = Runner::new(Scope::new());

        let result = runner.run_tasks(Vec::new(), "").await;
        assert!(matches!(result, Err(ExecutionError::EmptyTaskList)));
    }

    #[tokio::test]
    async fn test_rerun_with_same_keys_fails() {
        let runner = Runner::new(Scope::new());
        let pairs = || vec![(constant("fetch", 1), TaskParams::new())];

        runner.run_tasks(pairs(), "run1").await.unwrap();

        // Same scope, same run id, same position: duplicate key
        let result = runner.run_tasks(pairs(), "run1").await;
        assert!(matches!(
            result,
            Err(ExecutionError::RegistryError(
                crate::registry::RegistryError::DuplicateTask { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_group_run_tags_keys_with_group_id() {
        let scope = Scope::new();
        scope
            .register_group("nightly", vec![constant("build", 1), constant("ship", 2)])
            .await
            .unwrap();

        let runner = Runner::new(scope);
        let keys = runner.run_group("nightly", Vec::new()).await.unwrap();

        assert_eq!(keys, vec!["build.0.nightly", "ship.1.nightly"]);
    }

    #[tokio::test]
    async fn test_unknown_group_fails() {
        let runner = Runner::new(Scope::new());

        let result = runner.run_group("ghost", Vec::new()).await;
        assert!(matches!(
            result,
            Err(ExecutionError::RegistryError(
                crate::registry::RegistryError::GroupNotFound { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_short_param_list_defaults_to_empty() {
        let scope = Scope::new();

        let wants_param = TaskCallable::new("wants_param", |params: &TaskParams| {
            Ok(params.get("value").cloned().unwrap_or(Value::Null))
        })
        .unwrap();

        scope
            .register_group("partial", vec![wants_param.clone(), wants_param])
            .await
            .unwrap();

        let runner = Runner::new(scope.clone());
        let keys = runner
            .run_group("partial", vec![TaskParams::new().with("value", json!(7))])
            .await
            .unwrap();

        assert_eq!(keys.len(), 2);

        let first = scope.task(&keys[0]).await.unwrap();
        let second = scope.task(&keys[1]).await.unwrap();
        assert_eq!(first.result, Some(json!(7)));
        assert_eq!(second.result, Some(Value::Null));
    }
}
