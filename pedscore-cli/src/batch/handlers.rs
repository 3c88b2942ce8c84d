use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{info, warn};

use pedscore_scoring::{
    BatchOptions, PairOutcome, discover_pairs, run_batch as score_pairs, write_batch_csv,
};

use crate::compare::handlers::load_policy;

pub fn run_batch(matches: &ArgMatches) -> Result<()> {
    let golden_dir = matches
        .get_one::<String>("golden-dir")
        .context("--golden-dir is required")?;
    let test_dir = matches
        .get_one::<String>("test-dir")
        .context("--test-dir is required")?;
    let output = matches
        .get_one::<String>("output")
        .context("--output has a default value")?;

    let policy = load_policy(matches)?;
    let options = BatchOptions {
        threads: matches.get_one::<usize>("threads").copied(),
        show_progress: !matches.get_flag("no-progress"),
    };

    let pairs = discover_pairs(Path::new(golden_dir), Path::new(test_dir))
        .context("Failed to pair golden and candidate files")?;
    if pairs.is_empty() {
        warn!("No pedigree pairs found in {} and {}", golden_dir, test_dir);
    }

    let records = score_pairs(&pairs, &policy, &options)?;
    write_batch_csv(&records, Path::new(output))
        .with_context(|| format!("Failed to write results to {}", output))?;

    let scores: Vec<f64> = records
        .iter()
        .filter_map(|r| r.report())
        .map(|report| report.final_score)
        .collect();
    let failed = records
        .iter()
        .filter(|r| matches!(r.outcome, PairOutcome::Failed(_)))
        .count();

    if !scores.is_empty() {
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        println!("Scored {} pairs ({} failed)", scores.len(), failed);
        println!("Mean score: {:.2}  min: {:.2}  max: {:.2}", mean, min, max);
    }
    info!("Results written to {}", output);

    Ok(())
}
