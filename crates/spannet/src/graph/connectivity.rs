//! Connectivity and bridge analysis.
//!
//! Bridge tests are remove-check-restore queries: the edge comes back with
//! its original weight on every path, so a query never leaves a permanent
//! mutation behind. Each test is a full BFS; for E edges this makes
//! `number_of_bridges` O(E·(N+E)), fine at the target scale of tens of
//! nodes.

use super::GraphState;

impl GraphState {
    /// Breadth-first reachability from the source node (index 0).
    ///
    /// Returns true iff every node is reached. The empty edge set on more
    /// than one node is disconnected; traversal order never changes the
    /// result.
    pub fn is_connected(&self) -> bool {
        let n = self.num_nodes();
        if n <= 1 {
            return true;
        }
        let adj = self.adjacency_lists();
        let mut visited = vec![false; n];
        let mut queue = std::collections::VecDeque::from([0usize]);
        visited[0] = true;
        let mut reached = 1usize;
        while let Some(u) = queue.pop_front() {
            for &(v, _) in &adj[u] {
                if !visited[v] {
                    visited[v] = true;
                    reached += 1;
                    queue.push_back(v);
                }
            }
        }
        reached == n
    }

    /// Whether removing the existing edge `{i, j}` disconnects the graph.
    ///
    /// Takes `&mut self` because the test removes the edge and restores it
    /// unconditionally before returning; the edge set is identical before
    /// and after the call. Calling this on a missing edge is a contract
    /// violation and panics.
    pub fn is_bridge(&mut self, i: usize, j: usize) -> bool {
        let removed = self.remove_edge(i, j);
        assert!(
            removed.is_some(),
            "is_bridge queried on a missing edge ({i}, {j})"
        );
        let connected = self.is_connected();
        // Restoration recomputes the weight from the fixed points, which
        // reproduces the removed value bit for bit.
        self.add_edge(i, j);
        !connected
    }

    /// Count bridges by testing every current edge in isolation.
    pub fn number_of_bridges(&mut self) -> usize {
        self.edge_keys()
            .into_iter()
            .filter(|&(i, j)| self.is_bridge(i, j))
            .count()
    }
}
