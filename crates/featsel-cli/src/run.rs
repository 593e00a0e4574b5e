//! Non-interactive search runs driven by a JSON config and command-line flags.
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use featsel::config::{SearchConfig, SearchStrategy};
use featsel::feature_selection::{SearchEngine, SearchResult};
use featsel::io::{DataSource, FileDataSource, TableFormat};
use featsel::report::ConsoleReporter;
use featsel::Dataset;

/// Everything a `featsel search` run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub data_file: Option<PathBuf>,
    /// `None` picks the format from the file extension.
    pub format: Option<TableFormat>,
    pub has_headers: bool,
    pub normalize: bool,
    pub search: SearchConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            data_file: None,
            format: None,
            has_headers: false,
            normalize: true,
            search: SearchConfig::default(),
        }
    }
}

impl RunConfig {
    /// Start from the config file (or defaults) and apply command-line overrides.
    pub fn from_arguments(config_path: Option<&PathBuf>, matches: &ArgMatches) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => load_run_config(path)?,
            None => RunConfig::default(),
        };

        if let Some(data) = matches.get_one::<PathBuf>("data") {
            config.data_file = Some(data.clone());
        }
        if let Some(algorithm) = matches.get_one::<String>("algorithm") {
            config.search.strategy =
                SearchStrategy::from_str(algorithm).map_err(anyhow::Error::msg)?;
        }
        if let Some(&size) = matches.get_one::<usize>("target_size") {
            config.search.target_size = Some(size);
        }
        if let Some(&total) = matches.get_one::<usize>("total_features") {
            config.search.total_features = Some(total);
        }
        if let Some(format) = matches.get_one::<String>("format") {
            config.format = parse_format(format)?;
        }
        if matches.get_flag("headers") {
            config.has_headers = true;
        }
        if matches.get_flag("no_normalize") {
            config.normalize = false;
        }
        if matches.get_flag("warn_first_level") {
            config.search.warn_on_first_forward_level = true;
        }

        Ok(config)
    }

    pub fn data_source(&self) -> Result<FileDataSource> {
        let path = self
            .data_file
            .clone()
            .ok_or_else(|| anyhow!("No data file given on the command line or in the config"))?;
        Ok(FileDataSource {
            path,
            format: self.format,
            has_headers: self.has_headers,
            normalize: self.normalize,
        })
    }
}

/// `auto` means "detect from the extension".
pub fn parse_format(name: &str) -> Result<Option<TableFormat>> {
    if name.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    TableFormat::from_str(name)
        .map(Some)
        .map_err(anyhow::Error::msg)
}

/// Load a run configuration from a JSON file.
pub fn load_run_config<P: AsRef<Path>>(path: P) -> Result<RunConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: RunConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Run the configured search on an already loaded dataset, printing progress
/// to `out`.
pub fn search_dataset<W: Write>(
    dataset: &Dataset,
    search: &SearchConfig,
    out: W,
) -> Result<SearchResult> {
    let mut reporter = ConsoleReporter::new(out);
    let result = SearchEngine::new(dataset)
        .run(search, &mut reporter)
        .with_context(|| format!("{} search failed", search.strategy))?;
    reporter
        .into_inner()
        .context("Failed to write search progress")?;
    Ok(result)
}

/// Load the data file named by `config` and search it.
pub fn run_search<W: Write>(config: &RunConfig, out: W) -> Result<SearchResult> {
    let dataset = config.data_source()?.load()?;
    dataset.log_summary();
    search_dataset(&dataset, &config.search, out)
}
