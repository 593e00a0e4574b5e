use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::io;
use std::path::PathBuf;

use featsel::report::{format_accuracy, format_subset};
use featsel_cli::prompt::run_interactive;
use featsel_cli::run::{run_search, RunConfig};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(
            env_logger::Env::default()
                .filter_or("FEATSEL_LOG", "error,featsel=info,featsel_cli=info"),
        )
        .init();

    let matches = Command::new("featsel")
        .version(clap::crate_version!())
        .author("featsel developers")
        .about("Wrapper feature selection scored by nearest-neighbor leave-one-out accuracy")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("search")
                .about("Search a labeled data file for its most predictive feature subset")
                .arg(
                    Arg::new("data")
                        .help(
                            "Path to the data file. Overrides data_file in the configuration \
                             file.",
                        )
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("algorithm")
                        .short('a')
                        .long("algorithm")
                        .help("Search strategy: forward (1), backward (2) or exhaustive (3)")
                        .value_parser([
                            "forward",
                            "backward",
                            "exhaustive",
                            "1",
                            "2",
                            "3",
                        ])
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("target_size")
                        .short('k')
                        .long("target-size")
                        .help(
                            "Stop greedy searches at this many features, or the subset size \
                             for an exhaustive search",
                        )
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("total_features")
                        .long("total-features")
                        .help("Only search the first N feature columns")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .help("Data file layout. `auto` picks from the file extension.")
                        .value_parser(["auto", "text", "csv", "tsv"])
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("headers")
                        .long("headers")
                        .help("Skip the first row of a csv/tsv file")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("no_normalize")
                        .long("no-normalize")
                        .help("Use the raw feature values instead of min-max normalizing them")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("warn_first_level")
                        .long("warn-first-level")
                        .help(
                            "Warn when the first forward level does not beat the no-feature \
                             baseline",
                        )
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Path to a JSON run configuration file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("interactive")
                .about("Ask for a data file and an algorithm on standard input"),
        )
        .subcommand(
            Command::new("config").about("Print the default run configuration as JSON"),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Written by {author-with-newline}Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("search", sub_m)) => handle_search(sub_m),
        Some(("interactive", _)) => handle_interactive(),
        Some(("config", _)) => {
            println!("{}", serde_json::to_string_pretty(&RunConfig::default())?);
            Ok(())
        }
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_search(matches: &ArgMatches) -> Result<()> {
    let config_path = matches.get_one::<PathBuf>("config");
    if let Some(path) = config_path {
        log::info!("[featsel] Using config: {:?}", path);
    }
    let config = RunConfig::from_arguments(config_path, matches)?;
    log::debug!("[featsel] Run config: {:?}", config);

    match run_search(&config, io::stdout().lock()) {
        Ok(result) => {
            log::info!(
                "[featsel] Best subset {} at {} after {} evaluations",
                format_subset(&result.subset),
                format_accuracy(result.accuracy),
                result.evaluations
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Search failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_interactive() -> Result<()> {
    match run_interactive(io::stdin().lock(), io::stdout().lock()) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Interactive run failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
