// ABOUTME: Task graph construction and topological execution planning
// ABOUTME: Default linear-chain builder plus ready-set batching for traversal

use petgraph::algo::toposort;
use petgraph::graph::NodeIndex;
use petgraph::{Direction, Graph};
use std::collections::{HashMap, HashSet};

use super::error::{GraphError, Result};

/// Directed graph over task keys.
///
/// The default shape is a strict linear chain in caller-supplied order;
/// [`TaskGraph::with_edges`] accepts explicit edges for callers that
/// declare fan-out themselves.
pub struct TaskGraph {
    graph: Graph<String, ()>,
    indices: HashMap<String, NodeIndex>,
    order: Vec<String>,
}

/// Batched traversal plan: batch N holds every vertex whose predecessors
/// all completed in earlier batches.
pub struct ExecutionPlan {
    pub batches: Vec<Vec<String>>,
    pub total_vertices: usize,
}

impl TaskGraph {
    /// Build the default linear chain: an edge runs from each key to its
    /// immediate successor, so execution order is exactly the input order.
    pub fn chain(keys: &[String]) -> Result<Self> {
        let edges: Vec<(String, String)> = keys
            .windows(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect();

        Self::with_edges(keys, &edges)
    }

    /// Build a graph from an explicit edge list. Every edge endpoint must
    /// be one of `keys`.
    pub fn with_edges(keys: &[String], edges: &[(String, String)]) -> Result<Self> {
        if keys.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        let mut graph = Graph::new();
        let mut indices = HashMap::new();

        for key in keys {
            let node_index = graph.add_node(key.clone());
            indices.insert(key.clone(), node_index);
        }

        for (from, to) in edges {
            let from_index = *indices
                .get(from)
                .ok_or_else(|| GraphError::UnknownVertex {
                    vertex: from.clone(),
                })?;
            let to_index = *indices.get(to).ok_or_else(|| GraphError::UnknownVertex {
                vertex: to.clone(),
            })?;

            graph.add_edge(from_index, to_index, ());
        }

        Ok(Self {
            graph,
            indices,
            order: keys.to_vec(),
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.order.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.indices.contains_key(key)
    }

    /// Keys that must complete before the given key.
    pub fn predecessors(&self, key: &str) -> Vec<String> {
        self.neighbors(key, Direction::Incoming)
    }

    /// Keys unlocked by the given key's completion.
    pub fn successors(&self, key: &str) -> Vec<String> {
        self.neighbors(key, Direction::Outgoing)
    }

    fn neighbors(&self, key: &str, direction: Direction) -> Vec<String> {
        match self.indices.get(key) {
            Some(&node_index) => self
                .graph
                .neighbors_directed(node_index, direction)
                .map(|neighbor| self.graph[neighbor].clone())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Create the batched traversal plan.
    ///
    /// Vertices within a batch are listed in input order, which keeps
    /// sequential dispatch deterministic. A cycle is a planning failure.
    pub fn execution_plan(&self) -> Result<ExecutionPlan> {
        toposort(&self.graph, None).map_err(|cycle| GraphError::CircularDependency {
            vertices: vec![self.graph[cycle.node_id()].clone()],
        })?;

        let mut batches = Vec::new();
        let mut completed: HashSet<NodeIndex> = HashSet::new();
        let mut remaining: Vec<NodeIndex> =
            self.order.iter().map(|key| self.indices[key]).collect();

        while !remaining.is_empty() {
            let mut batch = Vec::new();
            let mut batch_nodes = Vec::new();

            for &node_index in &remaining {
                let ready = self
                    .graph
                    .neighbors_directed(node_index, Direction::Incoming)
                    .all(|dep| completed.contains(&dep));

                if ready {
                    batch.push(self.graph[node_index].clone());
                    batch_nodes.push(node_index);
                }
            }

            if batch.is_empty() {
                // Unreachable once toposort succeeded
                break;
            }

            for node_index in &batch_nodes {
                completed.insert(*node_index);
            }
            remaining.retain(|node_index| !completed.contains(node_index));

            batches.push(batch);
        }

        Ok(ExecutionPlan {
            total_vertices: self.order.len(),
            batches,
        })
    }
}

impl ExecutionPlan {
    /// Largest batch size, i.e. the widest parallel step.
    pub fn max_parallelism(&self) -> usize {
        self.batches.iter().map(|batch| batch.len()).max().unwrap_or(0)
    }

    /// Number of traversal steps.
    pub fn execution_depth(&self) -> usize {
        self.batches.len()
    }

    /// All keys in dispatch order.
    pub fn keys(&self) -> Vec<String> {
        self.batches.iter().flatten().cloned().collect()
    }
}
