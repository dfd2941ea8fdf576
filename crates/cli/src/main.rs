use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use spannet::chain::{Chain, ChainParams, RunSummary};
use spannet::geometry::Vec2;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Metropolis-Hastings sampler for spanning networks on fixed points")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Sample connected graphs and report count-weighted expectations
    Run {
        /// Comma-separated coordinates "x1,y1,...,xn,yn"; point 0 is the source
        #[arg(long)]
        nodes: String,
        /// Temperature (> 0); larger values flatten the stationary distribution
        #[arg(long, default_value_t = 1.0)]
        t: f64,
        /// Wiring-cost weight (>= 0) against source path lengths
        #[arg(long, default_value_t = 1.0)]
        r: f64,
        /// Number of recorded Metropolis-Hastings states (>= 1)
        #[arg(long, default_value_t = 1000)]
        steps: u64,
        /// RNG seed; equal seeds replay identical runs
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Write the JSON summary here instead of stdout
        #[arg(long)]
        out: Option<String>,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run {
            nodes,
            t,
            r,
            steps,
            seed,
            out,
        } => run(&nodes, t, r, steps, seed, out.as_deref()),
    }
}

fn run(nodes: &str, t: f64, r: f64, steps: u64, seed: u64, out: Option<&str>) -> Result<()> {
    let points = parse_nodes(nodes)?;
    tracing::info!(n = points.len(), t, r, steps, seed, "run");
    let chain = Chain::new(points, ChainParams { t, r, steps }, seed)?;
    let summary = chain.run();
    tracing::info!(
        distinct = summary.records.len(),
        accepted = summary.accepted,
        expected_edges = summary.expected_edges,
        "run_complete"
    );

    let doc = summary_json(&summary);
    match out {
        Some(path) => {
            let out_path = Path::new(path);
            if let Some(parent) = out_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(out_path, serde_json::to_vec_pretty(&doc)?)?;
        }
        None => println!("{}", serde_json::to_string_pretty(&doc)?),
    }
    Ok(())
}

/// Parse "x1,y1,x2,y2,..." into a point list. Point 0 is the source node;
/// fewer than 2 points is a user error.
fn parse_nodes(raw: &str) -> Result<Vec<Vec2>> {
    let values: Vec<f64> = raw
        .split(',')
        .map(|tok| {
            let tok = tok.trim();
            let v = tok
                .parse::<f64>()
                .with_context(|| format!("invalid coordinate {tok:?}"))?;
            // f64::parse accepts "NaN" and "inf"; neither is a usable
            // coordinate.
            if !v.is_finite() {
                bail!("non-finite coordinate {tok:?}");
            }
            Ok(v)
        })
        .collect::<Result<_>>()?;
    if values.len() % 2 != 0 {
        bail!(
            "expected an even number of coordinates, got {}",
            values.len()
        );
    }
    if values.len() < 4 {
        bail!(
            "need at least 2 points (4 coordinates), got {}",
            values.len() / 2
        );
    }
    Ok(values
        .chunks_exact(2)
        .map(|xy| Vec2::new(xy[0], xy[1]))
        .collect())
}

#[derive(Serialize)]
struct RecordOut {
    matrix: Vec<Vec<f64>>,
    count: u64,
    max_source_distance: f64,
}

fn summary_json(summary: &RunSummary) -> serde_json::Value {
    let records: Vec<RecordOut> = summary
        .records
        .iter()
        .map(|rec| {
            let n = rec.matrix.nrows();
            let matrix = (0..n)
                .map(|i| (0..n).map(|j| rec.matrix[(i, j)]).collect())
                .collect();
            RecordOut {
                matrix,
                count: rec.count,
                max_source_distance: rec.max_source_distance,
            }
        })
        .collect();
    serde_json::json!({
        "params": {
            "t": summary.params.t,
            "r": summary.params.r,
            "steps": summary.params.steps,
            "seed": summary.seed
        },
        "accepted": summary.accepted,
        "expected_edges": summary.expected_edges,
        "expected_source_degree": summary.expected_source_degree,
        "expected_max_source_distance": summary.expected_max_source_distance,
        "records": records
    })
}
