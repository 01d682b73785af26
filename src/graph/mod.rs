// ABOUTME: Dependency graph module for ordered task execution
// ABOUTME: Builds linear chains by default with an explicit-edge escape hatch

pub mod builder;
pub mod error;

pub use builder::{ExecutionPlan, TaskGraph};
pub use error::{GraphError, Result};
