// ABOUTME: Named task callables and immutable parameter mappings
// ABOUTME: Explicit builder API replacing decorator-style task registration

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::error::{Result, TaskError};

/// Immutable named-parameter mapping handed to a task callable.
///
/// Insertion order is preserved. Once a callable receives the mapping it
/// only reads from it; there is no mutation API.
#[derive(Debug, Clone, Default)]
pub struct TaskParams {
    values: IndexMap<String, Value>,
}

impl TaskParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert for constructing parameter mappings inline.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

impl FromIterator<(String, Value)> for TaskParams {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

type TaskFn = dyn Fn(&TaskParams) -> anyhow::Result<Value> + Send + Sync;

/// A named unit of work.
///
/// The declared name doubles as the registry identity used for title
/// lookup and key generation. The `Fn(&TaskParams)` signature makes the
/// parameter slot a compile-time guarantee rather than a runtime check.
#[derive(Clone)]
pub struct TaskCallable {
    name: String,
    func: Arc<TaskFn>,
}

impl TaskCallable {
    pub fn new<F>(name: impl Into<String>, func: F) -> Result<Self>
    where
        F: Fn(&TaskParams) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(TaskError::EmptyName);
        }

        Ok(Self {
            name,
            func: Arc::new(func),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the callable with the given parameter mapping.
    pub fn call(&self, params: &TaskParams) -> anyhow::Result<Value> {
        (self.func)(params)
    }
}

impl fmt::Debug for TaskCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskCallable")
            .field("name", &self.name)
            .finish()
    }
}
