//! FLOWNET: multi-terminal maximum flow
//!
//! Computes the greatest simultaneous throughput from a set of entrance nodes
//! to a set of exit nodes over a capacitated directed graph given as a square
//! capacity matrix. The multi-terminal instance is reduced to a two-terminal
//! one through a synthetic super-source and super-sink, and solved with
//! Ford-Fulkerson using shortest augmenting paths (Edmonds-Karp).
//!
//! ```
//! let capacities = vec![
//!     vec![0, 10, 3],
//!     vec![0, 0, 5],
//!     vec![0, 0, 0],
//! ];
//! assert_eq!(flownet::compute_max_flow(&[0], &[2], &capacities).unwrap(), 8);
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod data_structures;

pub use crate::algorithm::{
    compute_max_flow, find_augmenting_path, Algorithm, AlgorithmError, AlgorithmMetrics,
    Capacity, EdmondsKarp, Flow, FlowAlgorithm, FlowConfig, FlowOutcome, FlowProblem,
    MaxFlowResult, MultiTerminalReducer, NodeId, UNBOUNDED,
};
pub use crate::data_structures::{CapacityMatrix, ResidualGraph};
