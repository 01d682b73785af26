// ABOUTME: Error types for graph execution and run entrypoints
// ABOUTME: Aggregates registry, graph, title, and task failures for one run

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Task list is empty")]
    EmptyTaskList,

    #[error("Task execution failed: {key}")]
    TaskFailed {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Registry error: {0}")]
    RegistryError(#[from] crate::registry::RegistryError),

    #[error("Graph error: {0}")]
    GraphError(#[from] crate::graph::GraphError),

    #[error("Title error: {0}")]
    TitleError(#[from] crate::template::TitleError),

    #[error("Task error: {0}")]
    TaskError(#[from] crate::task::TaskError),

    #[error("Join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),

    #[error("System error: {0}")]
    SystemError(String),
}

pub type Result<T> = std::result::Result<T, ExecutionError>;
