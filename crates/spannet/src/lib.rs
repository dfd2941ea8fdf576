//! Metropolis-Hastings sampling of connected weighted graphs on fixed
//! planar points.
//!
//! States are spanning, connected, simple subgraphs of the complete graph on
//! N embedded 2D points; edge weights are Euclidean distances. The stationary
//! distribution trades total wiring cost against shortest-path distances from
//! the source node (index 0) via `theta = r * Σ weights + Σ dist(0, v)`.
//!
//! Layout
//! - `geometry`: point type and Euclidean edge weight.
//! - `graph`: the mutable graph state, connectivity/bridge analysis, and
//!   Dijkstra source distances.
//! - `proposal`: legal-move enumeration and the Hastings-corrected proposal.
//! - `energy`: theta and the unnormalized density ratio.
//! - `chain`: seeded chain driver, acceptance rule, and the sample
//!   accumulator with count-weighted expectations.

pub mod chain;
pub mod energy;
pub mod geometry;
pub mod graph;
pub mod proposal;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::chain::accumulator::{AdjacencyRecord, SampleAccumulator};
    pub use crate::chain::{Chain, ChainError, ChainParams, RunSummary};
    pub use crate::energy::{relative_p, theta};
    pub use crate::geometry::{weight, Vec2};
    pub use crate::graph::GraphState;
    pub use crate::proposal::{propose, vulnerable_edges, Move, MoveSet, Proposal};
}
