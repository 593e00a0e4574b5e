//! Loading labeled numeric tables from disk.
//!
//! Every supported layout puts the class label in the first column and the
//! features after it. Plain whitespace-separated text is the default;
//! `.csv` and `.tsv` files go through the `csv` reader.
pub mod table;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::preprocessing::normalize_min_max;

pub use table::{parse_whitespace, read_delimited, read_whitespace, RawTable};

/// Anything that can produce the labeled, normalized table a search runs on.
pub trait DataSource {
    fn load(&self) -> Result<Dataset>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableFormat {
    /// Columns separated by any run of spaces or tabs.
    Whitespace,
    Csv,
    Tsv,
}

impl TableFormat {
    /// Pick a format from the file extension; unknown extensions are read as
    /// whitespace-separated text.
    pub fn detect<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase());
        match ext.as_deref() {
            Some("csv") => TableFormat::Csv,
            Some("tsv") => TableFormat::Tsv,
            _ => TableFormat::Whitespace,
        }
    }

    fn delimiter(&self) -> Option<u8> {
        match self {
            TableFormat::Whitespace => None,
            TableFormat::Csv => Some(b','),
            TableFormat::Tsv => Some(b'\t'),
        }
    }
}

impl FromStr for TableFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "whitespace" => Ok(TableFormat::Whitespace),
            "csv" => Ok(TableFormat::Csv),
            "tsv" => Ok(TableFormat::Tsv),
            _ => Err(format!("Unknown table format: {}", s)),
        }
    }
}

/// Read a table in the given format, or the one implied by its extension.
pub fn read_table<P: AsRef<Path>>(
    path: P,
    format: Option<TableFormat>,
    has_headers: bool,
) -> Result<RawTable> {
    let path = path.as_ref();
    let format = format.unwrap_or_else(|| TableFormat::detect(path));
    log::debug!("Reading {} as {:?}", path.display(), format);
    match format.delimiter() {
        None => read_whitespace(path),
        Some(delimiter) => read_delimited(path, delimiter, has_headers),
    }
}

/// A table on disk, optionally min-max normalized on load.
#[derive(Debug, Clone)]
pub struct FileDataSource {
    pub path: PathBuf,
    pub format: Option<TableFormat>,
    pub has_headers: bool,
    pub normalize: bool,
}

impl FileDataSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileDataSource {
            path: path.into(),
            format: None,
            has_headers: false,
            normalize: true,
        }
    }
}

impl DataSource for FileDataSource {
    fn load(&self) -> Result<Dataset> {
        let raw = read_table(&self.path, self.format, self.has_headers)?;
        log::info!(
            "Successfully read {} instances, each with {} features from {}",
            raw.x.nrows(),
            raw.x.ncols(),
            self.path.display()
        );
        let x = if self.normalize {
            normalize_min_max(&raw.x)
        } else {
            raw.x
        };
        Dataset::new(x, raw.y)
            .with_context(|| format!("Invalid dataset in {}", self.path.display()))
    }
}
