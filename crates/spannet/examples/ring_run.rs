//! Timing and expectation probe for one sampler run on a ring of points.
//!
//! Purpose
//! - Provide a reproducible data point for "what does a few-thousand-step
//!   run over ~8 nodes cost, and what do the expectations look like?"
//!
//! Why this shape
//! - A ring layout keeps all pairwise distances comparable, so neither the
//!   wiring term nor the path term trivially dominates at r = 1.

use std::time::Instant;

use spannet::chain::{Chain, ChainParams};
use spannet::geometry::Vec2;

fn main() {
    let n = 8usize;
    let points: Vec<Vec2> = (0..n)
        .map(|k| {
            let theta = std::f64::consts::TAU * k as f64 / n as f64;
            Vec2::new(theta.cos(), theta.sin())
        })
        .collect();
    let params = ChainParams {
        t: 1.0,
        r: 1.0,
        steps: 4000,
    };

    let start = Instant::now();
    let chain = Chain::new(points, params, 2026).expect("valid run setup");
    let summary = chain.run();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;

    println!(
        "nodes={n} steps={} distinct_structures={} accepted={}",
        summary.params.steps,
        summary.records.len(),
        summary.accepted
    );
    println!(
        "expected_edges={:.6} expected_source_degree={:.6} expected_max_source_distance={:.6}",
        summary.expected_edges, summary.expected_source_degree, summary.expected_max_source_distance
    );
    println!("run_time_ms={elapsed_ms:.3}");
}
