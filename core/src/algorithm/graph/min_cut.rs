//! Minimum cut extraction from a terminated residual graph
//!
//! Once no augmenting path remains, the nodes reachable from the source over
//! positive residual capacity form the source side of a minimum cut, and the
//! original capacity crossing from that side to the rest equals the maximum
//! flow.

use std::collections::VecDeque;

use crate::algorithm::traits::{Capacity, NodeId};
use crate::data_structures::graph::ResidualGraph;

/// Marks every node reachable from `source` over positive residual capacity.
pub fn source_side(graph: &ResidualGraph, source: NodeId) -> Vec<bool> {
    let mut reachable = vec![false; graph.node_count()];
    let mut queue = VecDeque::from([source]);
    reachable[source.as_usize()] = true;

    while let Some(u) = queue.pop_front() {
        for (v, &capacity) in graph.row(u).iter().enumerate() {
            if capacity > 0 && !reachable[v] {
                reachable[v] = true;
                queue.push_back(NodeId(v));
            }
        }
    }

    reachable
}

/// Capacity of `graph` edges leaving the marked side, saturating at `UNBOUNDED`.
pub fn cut_capacity(graph: &ResidualGraph, side: &[bool]) -> Capacity {
    let mut total: Capacity = 0;
    for u in (0..side.len()).filter(|&u| side[u]) {
        for (v, &capacity) in graph.row(NodeId(u)).iter().enumerate() {
            if !side[v] {
                total = total.saturating_add(capacity);
            }
        }
    }
    total
}
