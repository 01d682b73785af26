// ABOUTME: Per-run task descriptors with composite key generation
// ABOUTME: Binds a callable to its parameters, run identity, and result slot

use serde_json::Value;

use super::callable::{TaskCallable, TaskParams};
use super::error::{Result, TaskError};

/// One schedulable unit: a callable bound to its parameters, its position
/// within a run, and a result slot written once by the executor.
#[derive(Debug, Clone)]
pub struct TaskDescriptor {
    callable: TaskCallable,
    params: TaskParams,
    run_id: String,
    seq_id: String,
    key: String,
    pub title: String,
    pub result: Option<Value>,
}

impl TaskDescriptor {
    /// Create a descriptor. The composite key is computed eagerly as
    /// `name.seq_id`, with `.run_id` appended when a run id is present.
    /// An empty sequence id is a construction-time failure.
    pub fn new(
        callable: TaskCallable,
        params: TaskParams,
        run_id: impl Into<String>,
        seq_id: impl Into<String>,
        title: Option<String>,
    ) -> Result<Self> {
        let seq_id = seq_id.into();
        if seq_id.is_empty() {
            return Err(TaskError::EmptySequenceId);
        }

        let run_id = run_id.into();

        let mut key = format!("{}.{}", callable.name(), seq_id);
        if !run_id.is_empty() {
            key.push('.');
            key.push_str(&run_id);
        }

        let title = title.unwrap_or_else(|| callable.name().to_string());

        Ok(Self {
            callable,
            params,
            run_id,
            seq_id,
            key,
            title,
            result: None,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        self.callable.name()
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn seq_id(&self) -> &str {
        &self.seq_id
    }

    pub fn params(&self) -> &TaskParams {
        &self.params
    }

    /// Invoke the underlying callable with this descriptor's parameters.
    pub fn invoke(&self) -> anyhow::Result<Value> {
        self.callable.call(&self.params)
    }
}
