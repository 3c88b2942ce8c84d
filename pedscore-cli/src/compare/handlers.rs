use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use pedscore_core::Pedigree;
use pedscore_scoring::{
    ScoringPolicy, compare_pedigrees, write_comparison_csv, write_report_json,
};

///
/// Load `--config` when given, otherwise the built-in policy.
///
pub fn load_policy(matches: &ArgMatches) -> Result<ScoringPolicy> {
    match matches.get_one::<String>("config") {
        Some(path) => ScoringPolicy::try_from(Path::new(path))
            .with_context(|| format!("Failed to load scoring policy from {}", path)),
        None => Ok(ScoringPolicy::default()),
    }
}

pub fn run_compare(matches: &ArgMatches) -> Result<()> {
    let golden_path = matches
        .get_one::<String>("golden")
        .context("A path to the golden pedigree is required.")?;
    let test_path = matches
        .get_one::<String>("test")
        .context("A path to the candidate pedigree is required.")?;

    let policy = load_policy(matches)?;

    let golden = Pedigree::try_from(golden_path.as_str())
        .with_context(|| format!("Failed to load golden pedigree {}", golden_path))?;
    let test = Pedigree::try_from(test_path.as_str())
        .with_context(|| format!("Failed to load candidate pedigree {}", test_path))?;

    let report = compare_pedigrees(&golden, &test, &policy);
    print!("{}", report);

    if let Some(output) = matches.get_one::<String>("output") {
        write_report_json(&report, Path::new(output))
            .with_context(|| format!("Failed to write report to {}", output))?;
        info!("Report written to {}", output);
    }

    if let Some(table) = matches.get_one::<String>("table") {
        write_comparison_csv(&report, Path::new(table))
            .with_context(|| format!("Failed to write comparison table to {}", table))?;
        info!("Comparison table written to {}", table);
    }

    Ok(())
}
