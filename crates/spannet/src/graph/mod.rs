//! Mutable graph state: fixed points plus a weighted simple edge set.
//!
//! Invariants
//! - The point set never changes after construction.
//! - Edges are stored once, keyed `(i, j)` with `i < j`; no self-loops.
//! - Each edge caches its Euclidean weight; the cache is recomputed from the
//!   points on insertion and is never independently settable.
//! - While driven by the chain, the graph stays connected (the support of
//!   the target distribution).

pub mod connectivity;
pub mod paths;

use std::collections::BTreeMap;

use nalgebra::DMatrix;

use crate::geometry::{weight, Vec2};

/// Undirected edge key, normalized to `i < j`.
pub type EdgeKey = (usize, usize);

/// A spanning, connected, simple, weighted graph over fixed planar points.
///
/// Candidate states in the chain are full deep copies (`Clone`); a rejected
/// proposal never shares mutable substructure with the state it was cloned
/// from.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphState {
    points: Vec<Vec2>,
    edges: BTreeMap<EdgeKey, f64>,
}

impl GraphState {
    /// Edge-free graph over the given points (point 0 is the source).
    pub fn new(points: Vec<Vec2>) -> Self {
        Self {
            points,
            edges: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Euclidean weight between any two valid node indices.
    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        weight(&self.points, i, j)
    }

    fn key(i: usize, j: usize) -> EdgeKey {
        assert_ne!(i, j, "self-loops are not representable");
        if i < j {
            (i, j)
        } else {
            (j, i)
        }
    }

    #[inline]
    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.edges.contains_key(&Self::key(i, j))
    }

    /// Insert the edge `{i, j}` with its Euclidean weight.
    ///
    /// Adding an already-present edge is an explicit no-op (returns `false`),
    /// so random initialization can re-draw a pair without corrupting the
    /// simple-graph invariant.
    pub fn add_edge(&mut self, i: usize, j: usize) -> bool {
        let key = Self::key(i, j);
        if self.edges.contains_key(&key) {
            return false;
        }
        let w = self.weight(key.0, key.1);
        self.edges.insert(key, w);
        true
    }

    /// Remove the edge `{i, j}`, returning its cached weight if present.
    pub fn remove_edge(&mut self, i: usize, j: usize) -> Option<f64> {
        self.edges.remove(&Self::key(i, j))
    }

    /// Edges in key order with their cached weights.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, f64)> + '_ {
        self.edges.iter().map(|(&k, &w)| (k, w))
    }

    /// Edge keys in key order (snapshot, safe to iterate while mutating).
    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges.keys().copied().collect()
    }

    pub fn degree(&self, node: usize) -> usize {
        self.edges
            .keys()
            .filter(|&&(a, b)| a == node || b == node)
            .count()
    }

    /// Sum of all cached edge weights (the wiring cost).
    pub fn sum_weights(&self) -> f64 {
        self.edges.values().sum()
    }

    /// Weighted adjacency lists `node -> [(neighbor, weight)]`.
    pub(crate) fn adjacency_lists(&self) -> Vec<Vec<(usize, f64)>> {
        let mut adj = vec![Vec::new(); self.num_nodes()];
        for (&(a, b), &w) in &self.edges {
            adj[a].push((b, w));
            adj[b].push((a, w));
        }
        adj
    }

    /// Canonical symmetric N×N weight matrix: 0 where no edge, the Euclidean
    /// weight otherwise. Structurally identical graphs map to equal matrices.
    pub fn adjacency_matrix(&self) -> DMatrix<f64> {
        let n = self.num_nodes();
        let mut a = DMatrix::zeros(n, n);
        for (&(i, j), &w) in &self.edges {
            a[(i, j)] = w;
            a[(j, i)] = w;
        }
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn square_points() -> Vec<Vec2> {
        vec![
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 1.0],
            vector![0.0, 1.0],
        ]
    }

    #[test]
    fn add_edge_caches_euclidean_weight() {
        let mut g = GraphState::new(square_points());
        assert!(g.add_edge(0, 2));
        let (_, w) = g.edges().next().unwrap();
        assert!((w - 2.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn duplicate_add_is_a_no_op() {
        let mut g = GraphState::new(square_points());
        assert!(g.add_edge(0, 1));
        assert!(!g.add_edge(1, 0));
        assert_eq!(g.num_edges(), 1);
    }

    #[test]
    fn edge_keys_are_normalized() {
        let mut g = GraphState::new(square_points());
        g.add_edge(3, 1);
        assert!(g.has_edge(1, 3));
        assert_eq!(g.edge_keys(), vec![(1, 3)]);
    }

    #[test]
    #[should_panic]
    fn self_loop_panics() {
        let mut g = GraphState::new(square_points());
        g.add_edge(2, 2);
    }

    #[test]
    fn degree_counts_incident_edges() {
        let mut g = GraphState::new(square_points());
        g.add_edge(0, 1);
        g.add_edge(0, 2);
        g.add_edge(2, 3);
        assert_eq!(g.degree(0), 2);
        assert_eq!(g.degree(3), 1);
    }

    #[test]
    fn adjacency_matrix_is_symmetric_with_zero_diagonal() {
        let mut g = GraphState::new(square_points());
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        let a = g.adjacency_matrix();
        for i in 0..4 {
            assert_eq!(a[(i, i)], 0.0);
            for j in 0..4 {
                assert_eq!(a[(i, j)], a[(j, i)]);
            }
        }
        assert!((a[(0, 1)] - 1.0).abs() < 1e-12);
        assert_eq!(a[(0, 3)], 0.0);
    }
}
