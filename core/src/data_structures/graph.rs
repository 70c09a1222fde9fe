//! Capacity matrix and residual graph storage
//!
//! `CapacityMatrix` is the validated, immutable input topology. `ResidualGraph`
//! is the live state mutated by augmentation: a single owned, flat row-major
//! buffer that is allocated once per computation and never resized.
//!
//! # Invariants
//! - Every finite entry of a validated `CapacityMatrix` sums, with all the
//!   others, to strictly less than `UNBOUNDED`.
//! - `push_flow(u, v, f)` preserves `residual(u, v) + residual(v, u)`.

use serde::Serialize;

use crate::algorithm::traits::{AlgorithmError, Capacity, NodeId, UNBOUNDED};

/// Validated square matrix of non-negative edge capacities
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacityMatrix {
    size: usize,
    cells: Vec<Capacity>,
}

impl CapacityMatrix {
    /// Builds a matrix from signed rows, rejecting negative or ragged input.
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self, AlgorithmError> {
        let size = rows.len();
        let mut converted = Vec::with_capacity(size * size);

        for (u, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(AlgorithmError::invalid_input(format!(
                    "matrix is not square: row {} has {} entries, expected {}",
                    u,
                    row.len(),
                    size
                )));
            }
            for (v, &value) in row.iter().enumerate() {
                let capacity = Capacity::try_from(value).map_err(|_| {
                    AlgorithmError::invalid_input(format!(
                        "negative capacity {} on edge {} -> {}",
                        value, u, v
                    ))
                })?;
                converted.push(capacity);
            }
        }

        Self::from_cells(size, converted)
    }

    /// Builds a matrix from unsigned rows.
    pub fn from_capacities(rows: Vec<Vec<Capacity>>) -> Result<Self, AlgorithmError> {
        let size = rows.len();
        if let Some((u, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(AlgorithmError::invalid_input(format!(
                "matrix is not square: row {} has {} entries, expected {}",
                u,
                row.len(),
                size
            )));
        }
        Self::from_cells(size, rows.into_iter().flatten().collect())
    }

    fn from_cells(size: usize, cells: Vec<Capacity>) -> Result<Self, AlgorithmError> {
        let bounded = cells
            .iter()
            .try_fold(0 as Capacity, |acc, &c| acc.checked_add(c))
            .is_some_and(|sum| sum < UNBOUNDED);
        if !bounded {
            return Err(AlgorithmError::invalid_input(
                "sum of capacities exceeds the representable range",
            ));
        }

        Ok(Self { size, cells })
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn capacity(&self, from: usize, to: usize) -> Capacity {
        self.cells[from * self.size + to]
    }

    /// Total capacity leaving `node`
    pub fn out_capacity(&self, node: usize) -> Capacity {
        self.cells[node * self.size..(node + 1) * self.size].iter().sum()
    }

    /// Total capacity entering `node`
    pub fn in_capacity(&self, node: usize) -> Capacity {
        (0..self.size).map(|u| self.capacity(u, node)).sum()
    }

    /// Iterates over every positive-capacity edge as `(from, to, capacity)`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, Capacity)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(move |(index, &c)| (index / size, index % size, c))
    }
}

/// Dense residual capacity graph mutated in place by augmentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidualGraph {
    size: usize,
    cells: Vec<Capacity>,
}

impl ResidualGraph {
    /// Creates an edgeless residual graph over `size` nodes.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Copies `matrix` into the top-left corner of a graph with `extra` more nodes.
    pub fn with_extra_nodes(matrix: &CapacityMatrix, extra: usize) -> Self {
        let n = matrix.node_count();
        let mut graph = Self::new(n + extra);
        for u in 0..n {
            let row = &matrix.cells[u * n..(u + 1) * n];
            graph.row_mut(u)[..n].copy_from_slice(row);
        }
        graph
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.as_usize() < self.size
    }

    #[inline]
    pub fn residual(&self, from: NodeId, to: NodeId) -> Capacity {
        self.cells[from.as_usize() * self.size + to.as_usize()]
    }

    #[inline]
    pub fn set_capacity(&mut self, from: NodeId, to: NodeId, capacity: Capacity) {
        let size = self.size;
        self.cells[from.as_usize() * size + to.as_usize()] = capacity;
    }

    /// Raises the capacity of `from -> to`, saturating at `UNBOUNDED`.
    pub fn add_capacity(&mut self, from: NodeId, to: NodeId, capacity: Capacity) {
        let size = self.size;
        let cell = &mut self.cells[from.as_usize() * size + to.as_usize()];
        *cell = cell.saturating_add(capacity);
    }

    /// Outgoing residual capacities of `node`, indexed by target.
    #[inline]
    pub fn row(&self, node: NodeId) -> &[Capacity] {
        let start = node.as_usize() * self.size;
        &self.cells[start..start + self.size]
    }

    #[inline]
    fn row_mut(&mut self, node: usize) -> &mut [Capacity] {
        let start = node * self.size;
        &mut self.cells[start..start + self.size]
    }

    /// Moves `amount` of residual capacity from `from -> to` onto `to -> from`.
    ///
    /// Callers pass a bottleneck no larger than `residual(from, to)`. The reverse
    /// side saturates so that an unbounded synthetic edge never wraps.
    pub fn push_flow(&mut self, from: NodeId, to: NodeId, amount: Capacity) {
        let size = self.size;
        let (u, v) = (from.as_usize(), to.as_usize());
        debug_assert!(self.cells[u * size + v] >= amount, "push exceeds residual capacity");
        self.cells[u * size + v] -= amount;
        self.cells[v * size + u] = self.cells[v * size + u].saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_from_rows() {
        let matrix = CapacityMatrix::from_rows(&[
            vec![0, 10, 3],
            vec![0, 0, 5],
            vec![0, 0, 0],
        ])
        .unwrap();

        assert_eq!(matrix.node_count(), 3);
        assert_eq!(matrix.capacity(0, 1), 10);
        assert_eq!(matrix.out_capacity(0), 13);
        assert_eq!(matrix.in_capacity(2), 8);
        assert_eq!(
            matrix.edges().collect::<Vec<_>>(),
            vec![(0, 1, 10), (0, 2, 3), (1, 2, 5)]
        );
    }

    #[test]
    fn test_matrix_rejects_malformed_input() {
        assert!(matches!(
            CapacityMatrix::from_rows(&[vec![0, 1], vec![0]]),
            Err(AlgorithmError::InvalidInput { .. })
        ));
        assert!(matches!(
            CapacityMatrix::from_rows(&[vec![0, -1], vec![0, 0]]),
            Err(AlgorithmError::InvalidInput { .. })
        ));
        assert!(matches!(
            CapacityMatrix::from_capacities(vec![vec![Capacity::MAX, 1], vec![0, 0]]),
            Err(AlgorithmError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_matrix_accepts_extreme_signed_capacities() {
        let matrix = CapacityMatrix::from_rows(&[
            vec![0, i64::MAX, i64::MAX],
            vec![0, 0, i64::MAX],
            vec![0, 0, 0],
        ])
        .unwrap();

        assert_eq!(matrix.out_capacity(0), 2 * i64::MAX as Capacity);
        assert_eq!(matrix.in_capacity(2), 2 * i64::MAX as Capacity);
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = CapacityMatrix::from_rows(&[]).unwrap();
        assert_eq!(matrix.node_count(), 0);
        assert_eq!(matrix.edges().count(), 0);
    }

    #[test]
    fn test_extended_residual_copy() {
        let matrix = CapacityMatrix::from_capacities(vec![vec![0, 4], vec![2, 0]]).unwrap();
        let graph = ResidualGraph::with_extra_nodes(&matrix, 2);

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.residual(NodeId(0), NodeId(1)), 4);
        assert_eq!(graph.residual(NodeId(1), NodeId(0)), 2);
        assert!(graph.row(NodeId(2)).iter().all(|&c| c == 0));
        assert_eq!(graph.row(NodeId(0)), &[0, 4, 0, 0]);
    }

    #[test]
    fn test_push_flow_preserves_pair_sum() {
        let mut graph = ResidualGraph::new(2);
        graph.set_capacity(NodeId(0), NodeId(1), 7);
        graph.set_capacity(NodeId(1), NodeId(0), 2);

        graph.push_flow(NodeId(0), NodeId(1), 5);

        assert_eq!(graph.residual(NodeId(0), NodeId(1)), 2);
        assert_eq!(graph.residual(NodeId(1), NodeId(0)), 7);
    }

    #[test]
    fn test_add_capacity_saturates() {
        let mut graph = ResidualGraph::new(2);
        graph.set_capacity(NodeId(0), NodeId(1), UNBOUNDED);
        graph.add_capacity(NodeId(0), NodeId(1), 5);
        assert_eq!(graph.residual(NodeId(0), NodeId(1)), UNBOUNDED);

        graph.add_capacity(NodeId(1), NodeId(0), 5);
        graph.add_capacity(NodeId(1), NodeId(0), 5);
        assert_eq!(graph.residual(NodeId(1), NodeId(0)), 10);
    }
}
