// ABOUTME: Error types for registry operations
// ABOUTME: Defines duplicate-registration and lookup failures per scope

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Task already registered: {key}")]
    DuplicateTask { key: String },

    #[error("Group already registered: {group_id}")]
    DuplicateGroup { group_id: String },

    #[error("Task not found: {key}")]
    TaskNotFound { key: String },

    #[error("Group not found: {group_id}")]
    GroupNotFound { group_id: String },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
