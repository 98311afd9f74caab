//! CLI tool for recordlink.
//!
//! Normalizes two identifiers and prints every metric, the phonetic block
//! keys of each side, and the weighted score.

use anyhow::{Context, Result};
use clap::Parser;
use recordlink::{
    jaro, jaro_winkler, levenshtein, metaphone, metaphone_block_key, soundex, soundex_block_key,
    Normalizer, Scorer,
};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "recordlink")]
#[command(about = "Compare two identifiers with record-linkage metrics", long_about = None)]
#[command(version)]
struct Cli {
    /// First identifier
    a: String,

    /// Second identifier
    b: String,

    /// Scorer weights, e.g. "jw=0.7,lev=0.3"
    #[arg(short, long, conflicts_with = "config")]
    weights: Option<Scorer>,

    /// JSON scorer config, e.g. {"weights": {"jw": 0.7, "lev": 0.3}}
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Extra characters preserved by normalization
    #[arg(short, long, default_value = "")]
    keep_chars: String,

    /// Bound for early Levenshtein cutoff
    #[arg(short = 'm', long)]
    max_distance: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "recordlink=debug" } else { "recordlink=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_scorer(cli: &Cli) -> Result<Scorer> {
    if let Some(scorer) = &cli.weights {
        return Ok(scorer.clone());
    }
    match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read scorer config {}", path.display()))?;
            Scorer::from_json(&json)
                .with_context(|| format!("Invalid scorer config {}", path.display()))
        }
        None => Ok(Scorer::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let scorer = load_scorer(&cli)?;
    debug!(weights = %scorer, "using scorer");

    let normalizer = Normalizer::with_keep_chars(cli.keep_chars.as_str());
    let a = normalizer.apply(&cli.a);
    let b = normalizer.apply(&cli.b);
    info!(raw_a = %cli.a, raw_b = %cli.b, "normalized inputs");

    println!("a: {a}");
    println!("b: {b}");

    let distance = levenshtein(&a, &b, cli.max_distance);
    match cli.max_distance {
        Some(max_d) if distance > max_d => println!("levenshtein: >{max_d}"),
        _ => println!("levenshtein: {distance}"),
    }
    println!("jaro: {:.4}", jaro(&a, &b));
    println!("jaro_winkler: {:.4}", jaro_winkler(&a, &b));
    println!("soundex(a), soundex(b): {} {}", soundex(&a), soundex(&b));
    println!("metaphone(a), metaphone(b): {} {}", metaphone(&a), metaphone(&b));
    println!(
        "block keys: soundex {} metaphone {}",
        if soundex_block_key(&a) == soundex_block_key(&b) { "same" } else { "differ" },
        if metaphone_block_key(&a) == metaphone_block_key(&b) { "same" } else { "differ" },
    );

    for (metric, value) in scorer.components(&a, &b) {
        println!("  {metric}: {value:.4}");
    }
    println!("score [{scorer}]: {:.4}", scorer.score(&a, &b));

    Ok(())
}
