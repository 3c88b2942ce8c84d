use clap::{Command, arg, value_parser};

use pedscore_scoring::consts::DEFAULT_OUT;

pub const BATCH_CMD: &str = "batch";

pub fn create_batch_cli() -> Command {
    Command::new(BATCH_CMD)
        .about("Score every {n}_golden.json / {n}_detectron.json pair in two directories.")
        .arg(
            arg!(--"golden-dir" <DIR>)
                .required(true)
                .help("Directory with the golden pedigree files"),
        )
        .arg(
            arg!(--"test-dir" <DIR>)
                .required(true)
                .help("Directory with the candidate pedigree files"),
        )
        .arg(
            arg!(--output <OUTPUT>)
                .required(false)
                .default_value(DEFAULT_OUT)
                .help("Results CSV (gzip-compressed when it ends in .gz)"),
        )
        .arg(
            arg!(--config <CONFIG>)
                .required(false)
                .help("Scoring policy TOML (default: built-in penalties)"),
        )
        .arg(
            arg!(--threads <THREADS>)
                .required(false)
                .value_parser(value_parser!(usize))
                .help("Number of worker threads (default: all cores)"),
        )
        .arg(
            arg!(--"no-progress")
                .required(false)
                .help("Hide the progress bar"),
        )
}
