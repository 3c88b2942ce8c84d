mod batch;
mod compare;
mod metrics;

use anyhow::Result;
use clap::{ArgAction, Command, arg};
use env_logger::Env;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "pedscore";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Score machine-extracted pedigree graphs against hand-annotated golden references.")
        .subcommand_required(true)
        .arg(
            arg!(-v --verbose)
                .help("Log debug output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(compare::cli::create_compare_cli())
        .subcommand(metrics::cli::create_metrics_cli())
        .subcommand(batch::cli::create_batch_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    let level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    match matches.subcommand() {
        //
        // COMPARE
        //
        Some((compare::cli::COMPARE_CMD, matches)) => {
            compare::handlers::run_compare(matches)?;
        }

        //
        // METRICS
        //
        Some((metrics::cli::METRICS_CMD, matches)) => {
            metrics::handlers::run_metrics(matches)?;
        }

        //
        // BATCH
        //
        Some((batch::cli::BATCH_CMD, matches)) => {
            batch::handlers::run_batch(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::*;

    #[rstest]
    fn test_parser_is_valid() {
        build_parser().debug_assert();
    }

    #[rstest]
    fn test_parse_batch_args() {
        let matches = build_parser()
            .try_get_matches_from([
                "pedscore",
                "batch",
                "--golden-dir",
                "g",
                "--test-dir",
                "t",
                "--threads",
                "2",
                "-v",
            ])
            .unwrap();
        assert!(matches.get_flag("verbose"));
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, batch::cli::BATCH_CMD);
        assert_eq!(sub.get_one::<usize>("threads"), Some(&2));
    }

    #[rstest]
    fn test_compare_requires_both_files() {
        let result = build_parser().try_get_matches_from(["pedscore", "compare", "a.json"]);
        assert!(result.is_err());
    }
}
