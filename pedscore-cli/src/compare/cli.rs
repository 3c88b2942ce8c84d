use clap::{Arg, Command, arg};

pub const COMPARE_CMD: &str = "compare";

pub fn create_compare_cli() -> Command {
    Command::new(COMPARE_CMD)
        .about("Score one candidate pedigree against its golden reference.")
        .arg(
            Arg::new("golden")
                .required(true)
                .help("Path to the golden pedigree JSON (.json or .json.gz)"),
        )
        .arg(
            Arg::new("test")
                .required(true)
                .help("Path to the candidate pedigree JSON (.json or .json.gz)"),
        )
        .arg(
            arg!(--config <CONFIG>)
                .required(false)
                .help("Scoring policy TOML (default: built-in penalties)"),
        )
        .arg(
            arg!(--output <OUTPUT>)
                .required(false)
                .help("Write the full score report as JSON to this path"),
        )
        .arg(
            arg!(--table <TABLE>)
                .required(false)
                .help("Write the per-metric comparison table as CSV to this path"),
        )
}
