// ABOUTME: Task model module for the stagehand orchestration core
// ABOUTME: Defines callables, parameter mappings, and per-run task descriptors

pub mod callable;
pub mod descriptor;
pub mod error;

pub use callable::{TaskCallable, TaskParams};
pub use descriptor::TaskDescriptor;
pub use error::{Result, TaskError};
