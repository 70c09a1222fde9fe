//! Core algorithm trait definitions for the flow engine
//!
//! This module establishes the trait system shared by flow algorithms: node
//! identity, the error taxonomy, execution metrics and the profiler that
//! collects them, and the `Algorithm` / `FlowAlgorithm` seams that let the
//! multi-terminal reducer drive any two-terminal solver.
//!
//! # Key Design Principles
//! - Integer capacities end to end, with an explicit unbounded sentinel
//! - String parameters validated at the trait boundary
//! - Deterministic behavior for given inputs

use std::fmt::{self, Debug, Display};
use std::time::{Duration, Instant};
use serde::{Serialize, Deserialize};

use crate::data_structures::graph::ResidualGraph;

/// Residual and original edge capacity; wide enough that any sum of `i64` inputs fits
pub type Capacity = u128;

/// Accumulated flow value
pub type Flow = u128;

/// Capacity of synthetic terminal edges; exceeds every admissible finite sum
pub const UNBOUNDED: Capacity = Capacity::MAX;

/// Universal algorithm identifier for type-safe dispatch
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmId(String);

impl AlgorithmId {
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Node identifier ensuring type safety and preventing mixing with capacities
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    #[inline]
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Comprehensive error types for flow computations
#[derive(Debug, thiserror::Error)]
pub enum AlgorithmError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Invalid node: {0}")]
    InvalidNode(NodeId),

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Accumulated flow exceeds the representable capacity range")]
    CapacityOverflow,

    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    #[error("Verification failed: flow {flow} does not match cut capacity {cut}")]
    VerificationFailed { flow: Flow, cut: Capacity },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AlgorithmError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput { reason: reason.into() }
    }

    pub(crate) fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Algorithm execution metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmMetrics {
    /// Augmentation rounds performed
    pub steps_executed: usize,
    /// Nodes dequeued across every breadth-first search
    pub nodes_explored: usize,
    pub execution_time: Duration,
    /// Smallest path flow pushed by any single augmentation
    pub smallest_bottleneck: Option<Capacity>,
}

/// Algorithm complexity information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: String,
    pub space_complexity: String,
    pub best_case: String,
    pub average_case: String,
    pub worst_case: String,
}

/// Outcome of a single two-terminal flow computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowOutcome {
    /// Total flow pushed from source to sink
    pub value: Flow,
    /// Number of augmenting paths applied
    pub augmentations: usize,
    pub metrics: AlgorithmMetrics,
}

/// Main algorithm trait
///
/// # Invariants
/// - State isolation between runs
/// - Deterministic behavior for given inputs
pub trait Algorithm: Debug + Send + Sync {
    /// Returns the algorithm's unique identifier
    fn id(&self) -> AlgorithmId;

    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category (e.g., max_flow)
    fn category(&self) -> &'static str;

    /// Returns the algorithm's description with complexity guarantees
    fn description(&self) -> String;

    /// Returns the algorithm's asymptotic complexity in Big-O notation
    fn complexity(&self) -> AlgorithmComplexity;

    /// Sets algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String>;
}

/// Two-terminal maximum flow specialization
pub trait FlowAlgorithm: Algorithm {
    /// Pushes the maximum flow from `source` to `sink`.
    ///
    /// The residual graph is consumed in place: on return it holds the final
    /// residual capacities, and must be rebuilt before another independent run.
    fn max_flow(
        &mut self,
        graph: &mut ResidualGraph,
        source: NodeId,
        sink: NodeId,
    ) -> Result<FlowOutcome, AlgorithmError>;

    /// Upper bound on nodes accepted, if the algorithm is configured with one
    fn node_limit(&self) -> Option<usize> {
        None
    }
}

/// Performance profiling integration
#[derive(Debug, Default)]
pub struct AlgorithmProfiler {
    metrics: AlgorithmMetrics,
    start_time: Option<Instant>,
}

impl AlgorithmProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.metrics.execution_time = start.elapsed();
        }
    }

    pub fn record_node_exploration(&mut self) {
        self.metrics.nodes_explored += 1;
    }

    pub fn record_step(&mut self) {
        self.metrics.steps_executed += 1;
    }

    pub fn record_bottleneck(&mut self, path_flow: Capacity) {
        let smallest = self.metrics.smallest_bottleneck.get_or_insert(path_flow);
        *smallest = (*smallest).min(path_flow);
    }

    pub fn get_metrics(&self) -> AlgorithmMetrics {
        self.metrics.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_id_uniqueness() {
        let id1 = AlgorithmId::new("edmonds_karp");
        let id2 = AlgorithmId::new("dinic");
        let id3 = AlgorithmId::new("edmonds_karp");

        assert_ne!(id1, id2);
        assert_eq!(id1, id3);
        assert_eq!(id1.as_str(), "edmonds_karp");
    }

    #[test]
    fn test_node_id_type_safety() {
        let node1 = NodeId(42);
        let node2 = NodeId::from(42);
        let node3 = NodeId(43);

        assert_eq!(node1, node2);
        assert_ne!(node1, node3);
        assert_eq!(node1.as_usize(), 42);
        assert_eq!(node3.to_string(), "43");
    }

    #[test]
    fn test_profiler_counts() {
        let mut profiler = AlgorithmProfiler::new();
        profiler.start();
        profiler.record_step();
        profiler.record_step();
        profiler.record_node_exploration();
        profiler.record_bottleneck(5);
        profiler.record_bottleneck(3);
        profiler.record_bottleneck(4);
        profiler.stop();

        let metrics = profiler.get_metrics();
        assert_eq!(metrics.steps_executed, 2);
        assert_eq!(metrics.nodes_explored, 1);
        assert_eq!(metrics.smallest_bottleneck, Some(3));
    }

    #[test]
    fn test_error_messages() {
        let err = AlgorithmError::invalid_input("matrix is not square");
        assert_eq!(err.to_string(), "Invalid input: matrix is not square");

        let err = AlgorithmError::InvalidNode(NodeId(7));
        assert_eq!(err.to_string(), "Invalid node: 7");

        let err = AlgorithmError::VerificationFailed { flow: 3, cut: 4 };
        assert!(err.to_string().contains("flow 3"));
    }
}
