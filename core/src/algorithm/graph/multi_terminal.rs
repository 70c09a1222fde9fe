//! Multi-Terminal Maximum Flow Reduction
//!
//! Reduces a maximum flow problem with several entrances and several exits to
//! a two-terminal one. The input matrix of `n` nodes is copied into an
//! `(n + 2) × (n + 2)` residual graph; node `n` becomes a super-source with an
//! unbounded edge to every entrance and node `n + 1` a super-sink with an
//! unbounded edge from every exit. The configured two-terminal solver then
//! runs between the two synthetic nodes.
//!
//! # Overlapping Terminals
//!
//! A node listed both as an entrance and an exit is an unlimited source and an
//! unlimited sink at once. Its trivial self-delivery is not counted: its
//! outgoing edges are attached to the super-source and its incoming edges to
//! the super-sink, so only flow that actually crosses an edge is measured.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::{debug, warn};
use serde::{Serialize, Deserialize};

use crate::algorithm::graph::max_flow::{EdmondsKarp, FlowConfig};
use crate::algorithm::graph::min_cut::source_side;
use crate::algorithm::traits::{
    AlgorithmError, AlgorithmMetrics, Flow, FlowAlgorithm, NodeId, UNBOUNDED,
};
use crate::data_structures::graph::{CapacityMatrix, ResidualGraph};

/// Maximum flow result with cut information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxFlowResult {
    /// Maximum simultaneous flow from all entrances to all exits
    pub max_flow: Flow,
    /// Augmenting paths applied by the two-terminal solver
    pub augmentations: usize,
    /// Input nodes on the source side of the final residual graph
    pub min_cut: Vec<NodeId>,
    pub metrics: AlgorithmMetrics,
}

/// Serializable description of a multi-terminal flow instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowProblem {
    pub entrances: Vec<usize>,
    pub exits: Vec<usize>,
    pub capacities: Vec<Vec<i64>>,
}

impl FlowProblem {
    pub fn from_json(json: &str) -> Result<Self, AlgorithmError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Solves the instance with the default Edmonds-Karp reducer.
    pub fn solve(&self) -> Result<MaxFlowResult, AlgorithmError> {
        self.solve_with(&mut MultiTerminalReducer::new())
    }

    pub fn solve_with<A: FlowAlgorithm>(
        &self,
        reducer: &mut MultiTerminalReducer<A>,
    ) -> Result<MaxFlowResult, AlgorithmError> {
        let matrix = CapacityMatrix::from_rows(&self.capacities)?;
        reducer.solve(&self.entrances, &self.exits, &matrix)
    }
}

/// Multi-source, multi-sink reduction over a pluggable two-terminal solver
#[derive(Debug, Clone, Default)]
pub struct MultiTerminalReducer<A: FlowAlgorithm = EdmondsKarp> {
    algorithm: A,
}

impl MultiTerminalReducer<EdmondsKarp> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FlowConfig) -> Self {
        Self::with_algorithm(EdmondsKarp::with_config(config))
    }
}

impl<A: FlowAlgorithm> MultiTerminalReducer<A> {
    pub fn with_algorithm(algorithm: A) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    pub fn algorithm_mut(&mut self) -> &mut A {
        &mut self.algorithm
    }

    /// Computes the maximum simultaneous flow from `entrances` to `exits`.
    ///
    /// `capacities` is never mutated; the computation runs on a private
    /// extended copy that is dropped on return. Empty terminal sets yield zero.
    pub fn solve(
        &mut self,
        entrances: &[usize],
        exits: &[usize],
        capacities: &CapacityMatrix,
    ) -> Result<MaxFlowResult, AlgorithmError> {
        let n = capacities.node_count();

        if let Some(limit) = self.algorithm.node_limit() {
            if n > limit {
                return Err(AlgorithmError::invalid_input(format!(
                    "{} nodes exceed the configured limit of {}",
                    n, limit
                )));
            }
        }

        let is_entrance = membership(entrances, n, "entrance")?;
        let is_exit = membership(exits, n, "exit")?;
        let overlapping: Vec<bool> = is_entrance
            .iter()
            .zip(&is_exit)
            .map(|(&entrance, &exit)| entrance && exit)
            .collect();

        let source = NodeId(n);
        let sink = NodeId(n + 1);
        let mut graph = build_extended_graph(capacities, &overlapping, source, sink);

        for i in 0..n {
            if overlapping[i] {
                warn!("node {} is both an entrance and an exit; self-delivery is ignored", i);
                continue;
            }
            if is_entrance[i] {
                graph.set_capacity(source, NodeId(i), UNBOUNDED);
            }
            if is_exit[i] {
                graph.set_capacity(NodeId(i), sink, UNBOUNDED);
            }
        }

        debug!(
            "reduced {} entrances and {} exits over {} nodes to a {}-node two-terminal instance",
            is_entrance.iter().filter(|&&flag| flag).count(),
            is_exit.iter().filter(|&&flag| flag).count(),
            n,
            graph.node_count()
        );

        let outcome = self.algorithm.max_flow(&mut graph, source, sink)?;

        let min_cut = source_side(&graph, source)
            .into_iter()
            .take(n)
            .enumerate()
            .filter_map(|(node, reachable)| reachable.then_some(NodeId(node)))
            .collect();

        Ok(MaxFlowResult {
            max_flow: outcome.value,
            augmentations: outcome.augmentations,
            min_cut,
            metrics: outcome.metrics,
        })
    }
}

/// Flags every listed node, rejecting indices outside `0..n`.
fn membership(nodes: &[usize], n: usize, role: &str) -> Result<Vec<bool>, AlgorithmError> {
    let mut flags = vec![false; n];
    for &node in nodes {
        if node >= n {
            return Err(AlgorithmError::invalid_input(format!(
                "{} index {} is out of range for {} nodes",
                role, node, n
            )));
        }
        flags[node] = true;
    }
    Ok(flags)
}

fn build_extended_graph(
    capacities: &CapacityMatrix,
    overlapping: &[bool],
    source: NodeId,
    sink: NodeId,
) -> ResidualGraph {
    if !overlapping.contains(&true) {
        return ResidualGraph::with_extra_nodes(capacities, 2);
    }

    let mut graph = ResidualGraph::new(capacities.node_count() + 2);
    for (u, v, capacity) in capacities.edges() {
        if u == v && overlapping[u] {
            continue;
        }
        let from = if overlapping[u] { source } else { NodeId(u) };
        let to = if overlapping[v] { sink } else { NodeId(v) };
        graph.add_capacity(from, to, capacity);
    }
    graph
}

/// Maximum simultaneous flow from all `entrances` to all `exits`.
///
/// `capacities` must be square with non-negative entries; zero means no edge.
/// Malformed input is rejected with `AlgorithmError::InvalidInput`, and a
/// graph in which no exit is reachable yields `Ok(0)`.
pub fn compute_max_flow(
    entrances: &[usize],
    exits: &[usize],
    capacities: &[Vec<i64>],
) -> Result<Flow, AlgorithmError> {
    let matrix = CapacityMatrix::from_rows(capacities)?;
    MultiTerminalReducer::new()
        .solve(entrances, exits, &matrix)
        .map(|result| result.max_flow)
}
