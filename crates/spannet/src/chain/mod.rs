//! Seeded Metropolis-Hastings chain driver.
//!
//! A step is an indivisible unit: propose, accept or reject, then record the
//! current graph into the accumulator. Recording never precedes resolution,
//! and a rejected move records the previous state again. Callers that need
//! early termination can drive `step` themselves and stop between steps
//! without breaking step atomicity.

pub mod accumulator;

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::energy::relative_p;
use crate::geometry::Vec2;
use crate::graph::GraphState;
use crate::proposal::{propose, Proposal};

use accumulator::{AdjacencyRecord, SampleAccumulator};

/// Error type for chain construction.
#[derive(Debug)]
pub enum ChainError {
    InvalidParams { reason: String },
    TooFewPoints { found: usize },
}

impl ChainError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { reason } => write!(f, "invalid chain params: {reason}"),
            Self::TooFewPoints { found } => {
                write!(f, "need at least 2 points, got {found}")
            }
        }
    }
}

impl std::error::Error for ChainError {}

/// Run parameters. `steps` counts recorded states, so a run with `steps = n`
/// records the initial graph plus `n - 1` accept-or-reject iterations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChainParams {
    /// Temperature, must be > 0.
    pub t: f64,
    /// Wiring-cost weight relative to source path lengths, must be >= 0.
    pub r: f64,
    /// Number of recorded states, must be >= 1.
    pub steps: u64,
}

impl ChainParams {
    pub fn validate(&self) -> Result<(), ChainError> {
        if !self.t.is_finite() || self.t <= 0.0 {
            return Err(ChainError::invalid("temperature t must be finite and > 0"));
        }
        if !self.r.is_finite() || self.r < 0.0 {
            return Err(ChainError::invalid("weight factor r must be finite and >= 0"));
        }
        if self.steps == 0 {
            return Err(ChainError::invalid("step count must be >= 1"));
        }
        Ok(())
    }
}

/// Aggregate results of a finished run.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub params: ChainParams,
    pub seed: u64,
    /// Steps whose proposal was accepted (the initial record is not a step).
    pub accepted: u64,
    pub expected_edges: f64,
    pub expected_source_degree: f64,
    pub expected_max_source_distance: f64,
    /// Distinct adjacency matrices with occurrence counts, insertion order.
    pub records: Vec<AdjacencyRecord>,
}

/// One Metropolis-Hastings chain over connected graphs on fixed points.
///
/// Owns the current state, the seeded RNG, and the sample accumulator; the
/// chain is strictly sequential and single-threaded. Construction builds the
/// initial connected graph by uniform random edge addition and records it as
/// the first sample.
#[derive(Debug)]
pub struct Chain {
    graph: GraphState,
    params: ChainParams,
    seed: u64,
    rng: StdRng,
    accum: SampleAccumulator,
    accepted: u64,
}

impl Chain {
    pub fn new(points: Vec<Vec2>, params: ChainParams, seed: u64) -> Result<Self, ChainError> {
        params.validate()?;
        if points.len() < 2 {
            return Err(ChainError::TooFewPoints {
                found: points.len(),
            });
        }
        // A NaN coordinate would poison every weight and defeat the
        // matrix-equality dedup in the accumulator, so fail before any
        // state is built.
        if let Some(idx) = points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(ChainError::invalid(format!(
                "point {idx} has a non-finite coordinate"
            )));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let mut graph = GraphState::new(points);
        generate(&mut graph, &mut rng);
        let mut accum = SampleAccumulator::new();
        accum.record(&graph);
        Ok(Self {
            graph,
            params,
            seed,
            rng,
            accum,
            accepted: 0,
        })
    }

    pub fn params(&self) -> &ChainParams {
        &self.params
    }

    pub fn graph(&self) -> &GraphState {
        &self.graph
    }

    pub fn accumulator(&self) -> &SampleAccumulator {
        &self.accum
    }

    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// One atomic chain step: propose, accept or reject, record.
    ///
    /// Returns whether a distinct candidate was accepted (a candidate always
    /// differs from its parent by exactly one edge). An empty move set (the
    /// N = 2 degenerate case) is a no-op iteration that still records.
    pub fn step(&mut self) -> bool {
        // One extra BFS per step is cheap at this scale, and continuing on
        // a disconnected state would silently corrupt the statistics.
        assert!(
            self.graph.is_connected(),
            "chain invariant violated: current state is disconnected"
        );
        let accepted = match propose(&mut self.graph, &mut self.rng) {
            Some(p) => self.accept_or_reject(p),
            None => false,
        };
        if accepted {
            self.accepted += 1;
        }
        self.accum.record(&self.graph);
        accepted
    }

    /// MH acceptance: `P = relative_p * q_ratio`, accept iff `u < P` with
    /// `u ~ U[0, 1)`. For P >= 1 this always accepts (u < 1 <= P), so no
    /// explicit min(1, P) clamp is needed.
    fn accept_or_reject(&mut self, proposal: Proposal) -> bool {
        let p_accept = relative_p(
            &self.graph,
            &proposal.candidate,
            self.params.t,
            self.params.r,
        ) * proposal.q_ratio;
        let u: f64 = self.rng.gen();
        if u < p_accept {
            self.graph = proposal.candidate;
            true
        } else {
            false
        }
    }

    /// Drive the remaining steps and summarize.
    pub fn run(mut self) -> RunSummary {
        for _ in 1..self.params.steps {
            self.step();
        }
        self.summarize()
    }

    /// Fold the accumulator into count-weighted expectations.
    pub fn summarize(self) -> RunSummary {
        RunSummary {
            params: self.params,
            seed: self.seed,
            accepted: self.accepted,
            expected_edges: self.accum.expected_edges(),
            expected_source_degree: self.accum.expected_source_degree(),
            expected_max_source_distance: self.accum.expected_max_source_distance(),
            records: self.accum.into_records(),
        }
    }
}

/// Random-until-connected initializer: draw distinct node pairs uniformly
/// and add the edge until BFS from the source reaches every node. Duplicate
/// picks are no-ops; termination is almost-surely finite and fast at the
/// target scale.
fn generate<R: Rng>(graph: &mut GraphState, rng: &mut R) {
    let n = graph.num_nodes();
    while !graph.is_connected() {
        let a = rng.gen_range(0..n);
        let mut b = rng.gen_range(0..n);
        while b == a {
            b = rng.gen_range(0..n);
        }
        graph.add_edge(a, b);
    }
}
