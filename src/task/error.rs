// ABOUTME: Error types for task model construction
// ABOUTME: Defines validation failures raised at descriptor build time

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Sequence id is empty")]
    EmptySequenceId,

    #[error("Callable name is empty")]
    EmptyName,
}

pub type Result<T> = std::result::Result<T, TaskError>;
