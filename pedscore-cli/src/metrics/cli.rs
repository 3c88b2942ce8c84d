use clap::{Arg, Command, arg};

pub const METRICS_CMD: &str = "metrics";

pub fn create_metrics_cli() -> Command {
    Command::new(METRICS_CMD)
        .about("Print the extracted graph metrics of a pedigree file as JSON.")
        .arg(
            Arg::new("file")
                .required(true)
                .help("Path to a pedigree JSON (.json or .json.gz)"),
        )
        .arg(
            arg!(--output <OUTPUT>)
                .required(false)
                .help("Output JSON path (default: stdout)"),
        )
}
