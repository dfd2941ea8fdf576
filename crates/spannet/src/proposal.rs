//! Proposal generation: legal-move enumeration and the Hastings ratio.
//!
//! A move toggles exactly one edge. Additions are legal for any non-edge
//! pair (adding an edge can never disconnect a connected graph); removals
//! are legal only for non-bridge edges, which keeps the chain inside the
//! support of the target distribution. The move set is recomputed fresh for
//! every state and never cached across mutations.

use rand::Rng;

use crate::graph::{EdgeKey, GraphState};

/// Legal moves out of a state: edges that may be added and edges that may
/// be removed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveSet {
    /// Index pairs `(i, j)` with `i < j` and no existing edge.
    pub addable: Vec<EdgeKey>,
    /// Existing edges whose removal keeps the graph connected.
    pub removable: Vec<EdgeKey>,
}

impl MoveSet {
    #[inline]
    pub fn len(&self) -> usize {
        self.addable.len() + self.removable.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.addable.is_empty() && self.removable.is_empty()
    }
}

/// Enumerate every legal single-edge move from the current state.
///
/// Takes `&mut self` only because bridge tests are remove-check-restore
/// queries; the graph is identical before and after the call.
pub fn vulnerable_edges(graph: &mut GraphState) -> MoveSet {
    let n = graph.num_nodes();
    let mut addable = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if !graph.has_edge(i, j) {
                addable.push((i, j));
            }
        }
    }
    let removable = graph
        .edge_keys()
        .into_iter()
        .filter(|&(i, j)| !graph.is_bridge(i, j))
        .collect();
    MoveSet { addable, removable }
}

/// The single edge toggled by a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    Add(EdgeKey),
    Remove(EdgeKey),
}

/// A pending candidate state with its Hastings correction.
#[derive(Clone, Debug)]
pub struct Proposal {
    /// Deep copy of the parent state with exactly one edge toggled.
    pub candidate: GraphState,
    pub mv: Move,
    /// `q(G|H) / q(H|G) = n_moves(G) / n_moves(H)`: the proposal is uniform
    /// over legal moves, and toggling an edge changes the legal-move count,
    /// so the chain needs this correction to stay in detailed balance.
    pub q_ratio: f64,
}

/// Draw one move uniformly from the legal move set and build the candidate.
///
/// Returns `None` when no legal move exists — with N = 2 the sole edge is a
/// bridge and no pair is free, so the iteration degenerates to a no-op
/// rather than a division by zero. For N ≥ 3 on a connected graph the move
/// set is never empty.
pub fn propose<R: Rng>(graph: &mut GraphState, rng: &mut R) -> Option<Proposal> {
    let moves = vulnerable_edges(graph);
    let n_moves = moves.len();
    if n_moves == 0 {
        return None;
    }
    let pick = rng.gen_range(0..n_moves);
    let mut candidate = graph.clone();
    let mv = if pick < moves.addable.len() {
        let (i, j) = moves.addable[pick];
        candidate.add_edge(i, j);
        Move::Add((i, j))
    } else {
        let (i, j) = moves.removable[pick - moves.addable.len()];
        candidate.remove_edge(i, j);
        Move::Remove((i, j))
    };
    // The inverse of the chosen move is always legal on the candidate (it
    // leads back to the connected parent), so the reverse count is >= 1.
    let n_rev = vulnerable_edges(&mut candidate).len();
    Some(Proposal {
        candidate,
        mv,
        q_ratio: n_moves as f64 / n_rev as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;
    use nalgebra::vector;
    use rand::{rngs::StdRng, SeedableRng};

    /// Vertical 4-point column with edges {01, 02, 12, 23}; (2,3) is the
    /// only bridge.
    fn column_graph() -> GraphState {
        let pts: Vec<Vec2> = (0..4).map(|k| vector![0.0, k as f64]).collect();
        let mut g = GraphState::new(pts);
        for (i, j) in [(0, 1), (0, 2), (1, 2), (2, 3)] {
            g.add_edge(i, j);
        }
        g
    }

    #[test]
    fn vulnerable_edges_splits_addable_and_removable() {
        let mut g = column_graph();
        let moves = vulnerable_edges(&mut g);
        assert_eq!(moves.addable, vec![(0, 3), (1, 3)]);
        // (2,3) is a bridge and must not be removable.
        assert_eq!(moves.removable, vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(moves.len(), 5);
    }

    #[test]
    fn enumeration_leaves_the_graph_unchanged() {
        let mut g = column_graph();
        let before = g.clone();
        vulnerable_edges(&mut g);
        assert_eq!(g, before);
    }

    #[test]
    fn proposal_toggles_exactly_one_edge() {
        let mut g = column_graph();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let p = propose(&mut g, &mut rng).unwrap();
            let delta = p.candidate.num_edges() as i64 - g.num_edges() as i64;
            match p.mv {
                Move::Add((i, j)) => {
                    assert_eq!(delta, 1);
                    assert!(p.candidate.has_edge(i, j));
                    assert!(!g.has_edge(i, j));
                }
                Move::Remove((i, j)) => {
                    assert_eq!(delta, -1);
                    assert!(!p.candidate.has_edge(i, j));
                    assert!(g.has_edge(i, j));
                }
            }
            assert!(p.candidate.is_connected());
        }
    }

    #[test]
    fn q_ratio_matches_recomputed_move_counts() {
        let mut g = column_graph();
        let mut rng = StdRng::seed_from_u64(3);
        let n_moves = vulnerable_edges(&mut g).len();
        let p = propose(&mut g, &mut rng).unwrap();
        let mut candidate = p.candidate.clone();
        let n_rev = vulnerable_edges(&mut candidate).len();
        assert!((p.q_ratio - n_moves as f64 / n_rev as f64).abs() < 1e-15);
        assert!(p.q_ratio > 0.0);
    }

    #[test]
    fn two_node_graph_has_no_legal_move() {
        let mut g = GraphState::new(vec![vector![0.0, 0.0], vector![1.0, 0.0]]);
        g.add_edge(0, 1);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(vulnerable_edges(&mut g).is_empty());
        assert!(propose(&mut g, &mut rng).is_none());
    }

    #[test]
    fn complete_graph_proposes_only_removals() {
        let pts: Vec<Vec2> = vec![vector![0.0, 0.0], vector![1.0, 0.0], vector![0.0, 1.0]];
        let mut g = GraphState::new(pts);
        for (i, j) in [(0, 1), (0, 2), (1, 2)] {
            g.add_edge(i, j);
        }
        let moves = vulnerable_edges(&mut g);
        assert!(moves.addable.is_empty());
        assert_eq!(moves.removable.len(), 3);
        let mut rng = StdRng::seed_from_u64(5);
        let p = propose(&mut g, &mut rng).unwrap();
        assert!(matches!(p.mv, Move::Remove(_)));
        // Reverse move set on the candidate path graph: 1 addable, 0
        // removable (both remaining edges are bridges), so q_ratio = 3.
        assert!((p.q_ratio - 3.0).abs() < 1e-15);
    }
}
