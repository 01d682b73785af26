// ABOUTME: Error types for graph construction and planning
// ABOUTME: Defines vertex, edge, and cycle failures

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Graph has no vertices")]
    EmptyGraph,

    #[error("Circular dependency detected: {vertices:?}")]
    CircularDependency { vertices: Vec<String> },

    #[error("Unknown vertex in edge list: {vertex}")]
    UnknownVertex { vertex: String },
}

pub type Result<T> = std::result::Result<T, GraphError>;
