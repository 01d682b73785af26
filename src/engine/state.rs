// ABOUTME: Run and vertex state machines for graph execution
// ABOUTME: Tracks Pending/Running/Completed/Failed transitions with timestamps

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VertexStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VertexState {
    pub key: String,
    pub status: VertexStatus,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

/// Bookkeeping for one run: overall status plus per-vertex states and the
/// order in which vertices completed.
#[derive(Debug, Clone)]
pub struct RunState {
    pub status: RunStatus,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    vertices: HashMap<String, VertexState>,
    completed_order: Vec<String>,
}

impl VertexState {
    pub fn new(key: String) -> Self {
        Self {
            key,
            status: VertexStatus::Pending,
            start_time: None,
            end_time: None,
        }
    }

    pub fn mark_started(&mut self) {
        self.status = VertexStatus::Running;
        self.start_time = Some(Utc::now());
    }

    pub fn mark_completed(&mut self) {
        self.status = VertexStatus::Completed;
        self.end_time = Some(Utc::now());
    }

    pub fn mark_failed(&mut self) {
        self.status = VertexStatus::Failed;
        self.end_time = Some(Utc::now());
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, VertexStatus::Completed | VertexStatus::Failed)
    }
}

impl RunState {
    pub fn new(keys: &[String]) -> Self {
        let vertices = keys
            .iter()
            .map(|key| (key.clone(), VertexState::new(key.clone())))
            .collect();

        Self {
            status: RunStatus::Pending,
            start_time: None,
            end_time: None,
            vertices,
            completed_order: Vec::new(),
        }
    }

    pub fn mark_started(&mut self) {
        self.status = RunStatus::Running;
        self.start_time = Some(Utc::now());
    }

    pub fn mark_completed(&mut self) {
        self.status = RunStatus::Completed;
        self.end_time = Some(Utc::now());
    }

    pub fn mark_failed(&mut self) {
        self.status = RunStatus::Failed;
        self.end_time = Some(Utc::now());
    }

    pub fn mark_vertex_started(&mut self, key: &str) {
        if let Some(vertex) = self.vertices.get_mut(key) {
            vertex.mark_started();
        }
    }

    pub fn mark_vertex_completed(&mut self, key: &str) {
        if let Some(vertex) = self.vertices.get_mut(key) {
            vertex.mark_completed();
            self.completed_order.push(key.to_string());
        }
    }

    pub fn mark_vertex_failed(&mut self, key: &str) {
        if let Some(vertex) = self.vertices.get_mut(key) {
            vertex.mark_failed();
        }
    }

    pub fn vertex(&self, key: &str) -> Option<&VertexState> {
        self.vertices.get(key)
    }

    /// Keys of completed vertices, in completion order.
    pub fn completed_order(&self) -> &[String] {
        &self.completed_order
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, RunStatus::Completed | RunStatus::Failed)
    }
}

impl std::fmt::Display for VertexStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VertexStatus::Pending => write!(f, "pending"),
            VertexStatus::Running => write!(f, "running"),
            VertexStatus::Completed => write!(f, "completed"),
            VertexStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Pending => write!(f, "pending"),
            RunStatus::Running => write!(f, "running"),
            RunStatus::Completed => write!(f, "completed"),
            RunStatus::Failed => write!(f, "failed"),
        }
    }
}
