// ABOUTME: Execution engine module for the stagehand orchestration core
// ABOUTME: Handles graph traversal, dispatch strategies, and run entrypoints

pub mod error;
pub mod executor;
pub mod processor;
pub mod runner;
pub mod state;

pub use error::{ExecutionError, Result};
pub use executor::{GraphExecutor, TaskExecutor, VertexExecutor};
pub use processor::{BatchOutcome, Processor};
pub use runner::Runner;
pub use state::{RunState, RunStatus, VertexState, VertexStatus};
