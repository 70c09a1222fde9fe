//! Graph storage shared by the flow algorithms

pub mod graph;

pub use self::graph::{CapacityMatrix, ResidualGraph};
