//! Shortest paths from the source node over Euclidean edge weights.

use super::GraphState;

impl GraphState {
    /// Dijkstra distances from node 0 to every node.
    ///
    /// Unreachable nodes get `f64::INFINITY`; while the chain's connectivity
    /// invariant holds this never happens. The O(N²) minimum scan is
    /// deliberate at the target scale (tens of nodes).
    pub fn source_distances(&self) -> Vec<f64> {
        let n = self.num_nodes();
        let mut dist = vec![f64::INFINITY; n];
        if n == 0 {
            return dist;
        }
        let adj = self.adjacency_lists();
        let mut done = vec![false; n];
        dist[0] = 0.0;
        loop {
            let mut cur = None;
            let mut best = f64::INFINITY;
            for (v, &d) in dist.iter().enumerate() {
                if !done[v] && d < best {
                    best = d;
                    cur = Some(v);
                }
            }
            let Some(u) = cur else { break };
            done[u] = true;
            for &(v, w) in &adj[u] {
                let cand = dist[u] + w;
                if cand < dist[v] {
                    dist[v] = cand;
                }
            }
        }
        dist
    }

    /// Largest source distance (the source's weighted eccentricity).
    pub fn max_source_distance(&self) -> f64 {
        self.source_distances()
            .into_iter()
            .fold(0.0, f64::max)
    }
}
