use std::fs::File;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ArgMatches;

use pedscore_core::Pedigree;
use pedscore_metrics::PedigreeStatistics;

pub fn run_metrics(matches: &ArgMatches) -> Result<()> {
    let path = matches
        .get_one::<String>("file")
        .context("A path to a pedigree file is required.")?;

    let pedigree = Pedigree::try_from(path.as_str())
        .with_context(|| format!("Failed to load pedigree {}", path))?;
    let aggregate = pedigree.aggregate();

    let json = serde_json::to_string_pretty(&aggregate)?;
    match matches.get_one::<String>("output") {
        Some(output) => {
            let mut file = File::create(output)
                .with_context(|| format!("Failed to create {}", output))?;
            writeln!(file, "{}", json)?;
        }
        None => {
            let stdout = io::stdout();
            writeln!(stdout.lock(), "{}", json)?;
        }
    }

    Ok(())
}
