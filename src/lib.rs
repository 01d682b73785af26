// ABOUTME: Main library module for the stagehand orchestration core
// ABOUTME: Exports all core modules and provides the public API

pub mod engine;
pub mod graph;
pub mod registry;
pub mod task;
pub mod template;

// Re-export commonly used types
pub use engine::{
    ExecutionError, GraphExecutor, Processor, RunStatus, Runner, TaskExecutor, VertexExecutor,
    VertexStatus,
};
pub use graph::{ExecutionPlan, TaskGraph};
pub use registry::{RegistryEntry, Scope};
pub use task::{TaskCallable, TaskDescriptor, TaskParams};
pub use template::{TitleContext, TitleEngine};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
