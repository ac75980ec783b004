//! Earth Mover's Distance Binary
//!
//! Solves one transport problem, read from a JSON file or taken from the
//! built-in demonstration sets, and reports the plan.

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use emdflow::emd::*;
use std::path::Path;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Exact Earth Mover's Distance between weighted point sets")]
struct Args {
    /// JSON problem file; the demonstration sets are used when omitted
    input: Option<PathBuf>,
    /// Ground distance between points
    #[arg(short, long, value_enum, default_value_t = Ground::Euclidean)]
    ground: Ground,
    /// Print the plan as JSON instead of a report
    #[arg(long)]
    json: bool,
    /// Give up after this many flow augmentations
    #[arg(long)]
    limit: Option<usize>,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Problem file layout. Weights are optional and default to one per point.
#[derive(serde::Deserialize)]
struct Problem {
    source: Vec<Point>,
    target: Vec<Point>,
    source_weights: Option<Vec<f64>>,
    target_weights: Option<Vec<f64>>,
}

impl Default for Problem {
    fn default() -> Self {
        Self {
            source: vec![[0., 0.], [1., 0.], [0., 1.]]
                .into_iter()
                .map(Point::from)
                .collect(),
            target: vec![[0., 0.], [0., 1.], [1., 0.], [1., 1.]]
                .into_iter()
                .map(Point::from)
                .collect(),
            source_weights: None,
            target_weights: None,
        }
    }
}

impl Problem {
    fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }
}

fn report(plan: &Plan) {
    println!("the EMD value is {}", plan.emd());
    println!("{}", "here are the details of the optimal transport:".bold());
    println!("==============================================");
    for row in plan.rows() {
        println!("{} gets transported to the following:", row.point());
        for m in row.moves().iter().filter(|m| m.mass() > 0.) {
            println!("{:.2} units get transported to {}", m.mass(), m.point());
        }
        println!();
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    emdflow::log(match args.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    });
    let problem = match args.input {
        Some(ref path) => Problem::load(path)?,
        None => Problem::default(),
    };
    log::info!(
        "transporting {} source points onto {} target points under {} distance",
        problem.source.len(),
        problem.target.len(),
        args.ground
    );
    let mut transport = Transport::new(&problem.source, &problem.target).ground(args.ground);
    if let Some(ref weights) = problem.source_weights {
        transport = transport.source_weights(weights);
    }
    if let Some(ref weights) = problem.target_weights {
        transport = transport.target_weights(weights);
    }
    if let Some(limit) = args.limit {
        transport = transport.limit(limit);
    }
    let plan = transport.solve().context("computing optimal transport")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        report(&plan);
    }
    Ok(())
}
