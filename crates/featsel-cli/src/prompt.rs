//! The question-and-answer front end: ask for a file, describe it, ask for
//! an algorithm, run it.
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use featsel::config::{SearchConfig, SearchStrategy};
use featsel::feature_selection::SearchResult;
use featsel::io::{DataSource, FileDataSource};
use featsel::preprocessing::normalize_min_max;
use featsel::Dataset;

use crate::run::search_dataset;

fn read_answer<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let n = input
        .read_line(&mut line)
        .context("Failed to read from standard input")?;
    if n == 0 {
        bail!("Input ended before an answer was given");
    }
    Ok(line.trim().to_string())
}

/// Write the dataset line shown after loading.
pub fn write_summary<W: Write>(out: &mut W, dataset: &Dataset) -> std::io::Result<()> {
    writeln!(
        out,
        "This dataset has {} features (not including the class attribute), with {} instances.",
        dataset.n_features(),
        dataset.n_instances()
    )
}

/// Run the prompt flow. Returns `None` when the algorithm choice is not on
/// the menu.
pub fn run_interactive<R: BufRead, W: Write>(
    mut input: R,
    mut out: W,
) -> Result<Option<SearchResult>> {
    writeln!(out, "Welcome to Feature Selection Algorithm.")?;
    write!(out, "Type in the name of the file to test: ")?;
    out.flush()?;
    let file_name = read_answer(&mut input)?;

    let mut source = FileDataSource::new(PathBuf::from(&file_name));
    source.normalize = false;
    let raw = source.load().context("Error reading dataset")?;

    writeln!(
        out,
        "Successfully read {} instances, each with {} features.",
        raw.n_instances(),
        raw.n_features()
    )?;
    write_summary(&mut out, &raw)?;
    writeln!(out)?;
    writeln!(out, "Type the number of the algorithm you want to run.")?;
    writeln!(out, "1) Forward Selection")?;
    writeln!(out, "2) Backward Elimination")?;
    writeln!(
        out,
        "3) Exhaustive Search (every subset of {} features)",
        SearchConfig::DEFAULT_EXHAUSTIVE_SIZE.min(raw.n_features())
    )?;
    out.flush()?;

    let strategy = match SearchStrategy::from_str(&read_answer(&mut input)?) {
        Ok(strategy) => strategy,
        Err(msg) => {
            log::debug!("{}", msg);
            writeln!(out, "Invalid choice")?;
            return Ok(None);
        }
    };
    log::info!("Running {} search on {}", strategy, file_name);

    write!(out, "Please wait while I normalize the data... ")?;
    let dataset = Dataset::new(normalize_min_max(raw.features()), raw.labels().to_vec())?;
    writeln!(out, "Done!")?;
    writeln!(out)?;

    let result = search_dataset(&dataset, &SearchConfig::new(strategy), &mut out)?;
    Ok(Some(result))
}
