//! Energy model: theta and the unnormalized stationary-density ratio.

use crate::graph::GraphState;

/// `theta(G, r) = r * Σ edge weights + Σ_v dist(0, v)`.
///
/// `r >= 0` trades total wiring cost against source-to-node latency; `r = 0`
/// scores path lengths only. Evaluated on a disconnected graph this is
/// infinite, which the chain invariant rules out.
pub fn theta(graph: &GraphState, r: f64) -> f64 {
    let path_sum: f64 = graph.source_distances().iter().sum();
    r * graph.sum_weights() + path_sum
}

/// Unnormalized density ratio `pi(H) / pi(G) = exp(-(theta(H) - theta(G)) / t)`
/// for temperature `t > 0`. Larger `t` flattens the distribution.
pub fn relative_p(g: &GraphState, h: &GraphState, t: f64, r: f64) -> f64 {
    (-(theta(h, r) - theta(g, r)) / t).exp()
}
