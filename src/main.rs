use annotator_core::{read_json, Error};
use annotator_match::{
    MatchConfig, MatchResult, MatchSummary, Matcher, RankedMatch, DEFAULT_MIN_HIGH_MATCHES,
};
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Match a cutout analysis against candidate product analyses
#[derive(Parser, Debug)]
#[command(name = "annotator-match")]
#[command(about = "Fuzzy product-to-cutout matching", long_about = None)]
struct Args {
    /// Cutout analysis JSON file
    #[arg(short, long)]
    cutout: PathBuf,

    /// JSON file holding an array of candidate product records
    #[arg(short, long)]
    products: PathBuf,

    /// Matcher configuration (weights, field rules, threshold)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print every candidate ranked instead of the best match only
    #[arg(long)]
    rank: bool,

    /// Score candidates on all cores
    #[arg(long)]
    parallel: bool,

    /// High-scoring fields required for the summary to accept the match
    #[arg(long, default_value_t = DEFAULT_MIN_HIGH_MATCHES)]
    min_high_matches: usize,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Serialize)]
struct BestOutput<'p> {
    #[serde(rename = "match")]
    best: Option<MatchResult<'p>>,
    summary: MatchSummary,
}

#[derive(Serialize)]
struct RankOutput<'p> {
    ranked: Vec<RankedMatch<'p>>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries the JSON result only
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("annotator-match v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => {
            info!("Config file: {:?}", path);
            MatchConfig::from_path(path)?
        }
        None => MatchConfig::default(),
    };
    let matcher = Matcher::new(config);

    let cutout = read_json(&args.cutout)?;
    let products = match read_json(&args.products)? {
        Value::Array(items) => items,
        _ => {
            return Err(Error::InvalidInput(format!(
                "{} must hold a JSON array of product records",
                args.products.display()
            ))
            .into())
        }
    };
    info!(candidates = products.len(), "Matching cutout {:?}", args.cutout);

    let output = if args.rank {
        let ranked = matcher.rank_candidates(&cutout, &products);
        serde_json::to_string_pretty(&RankOutput { ranked })?
    } else {
        let best = if args.parallel {
            matcher.find_best_match_par(&cutout, &products)
        } else {
            matcher.find_best_match(&cutout, &products)
        };
        let summary = matcher.summarize(best.as_ref(), products.len(), args.min_high_matches);

        match &best {
            Some(result) => info!(
                score = result.score,
                high_matches = summary.high_match_count,
                accepted = summary.accepted,
                "Best match found"
            ),
            None => info!("No candidates to match"),
        }
        serde_json::to_string_pretty(&BestOutput { best, summary })?
    };

    println!("{output}");
    Ok(())
}
