use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};

use crate::math::Array2;

/// Un-normalized features plus labels, exactly as read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub x: Array2<f64>,
    pub y: Vec<i32>,
}

/// Accumulates rows and enforces a constant feature width.
struct TableBuilder {
    features: Vec<f64>,
    labels: Vec<i32>,
    width: Option<usize>,
}

impl TableBuilder {
    fn new() -> Self {
        TableBuilder {
            features: Vec::new(),
            labels: Vec::new(),
            width: None,
        }
    }

    fn push<'a, I>(&mut self, mut fields: I, line: usize) -> Result<()>
    where
        I: Iterator<Item = &'a str>,
    {
        let label_field = fields
            .next()
            .ok_or_else(|| anyhow!("Missing label value at line {}", line))?;
        let label = parse_label(label_field, line)?;

        let start = self.features.len();
        for field in fields {
            let value = field
                .trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid feature '{}' at line {}", field, line))?;
            self.features.push(value);
        }
        let width = self.features.len() - start;
        if width == 0 {
            bail!("No feature values at line {}", line);
        }
        match self.width {
            None => self.width = Some(width),
            Some(expected) if expected != width => bail!(
                "Inconsistent number of features at line {}: expected {}, found {}",
                line,
                expected,
                width
            ),
            Some(_) => {}
        }
        self.labels.push(label);
        Ok(())
    }

    fn finish(self) -> Result<RawTable> {
        let width = self
            .width
            .ok_or_else(|| anyhow!("No valid data found in file"))?;
        let x = Array2::from_shape_vec((self.labels.len(), width), self.features)
            .context("Failed to build feature matrix")?;
        Ok(RawTable { x, y: self.labels })
    }
}

/// Labels are often written as floats (`2.0000000e+00`); they must still be
/// whole numbers.
fn parse_label(field: &str, line: usize) -> Result<i32> {
    let value = field
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid label '{}' at line {}", field, line))?;
    if !value.is_finite() || value.fract() != 0.0 {
        bail!("Label '{}' at line {} is not an integer", field, line);
    }
    if value < i32::MIN as f64 || value > i32::MAX as f64 {
        bail!("Label '{}' at line {} is out of range", field, line);
    }
    Ok(value as i32)
}

/// Parse whitespace-separated text: one instance per line, label first.
/// Blank lines are skipped.
pub fn parse_whitespace(text: &str) -> Result<RawTable> {
    let mut builder = TableBuilder::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        builder.push(line.split_whitespace(), idx + 1)?;
    }
    builder.finish()
}

pub fn read_whitespace<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Could not open file: {}", path.as_ref().display()))?;
    parse_whitespace(&text).with_context(|| format!("Failed to parse {}", path.as_ref().display()))
}

/// Read a delimited table through the `csv` reader. With `has_headers`, the
/// first record is skipped.
pub fn read_delimited<P: AsRef<Path>>(
    path: P,
    delimiter: u8,
    has_headers: bool,
) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(has_headers)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(&path)
        .with_context(|| format!("Could not open file: {}", path.as_ref().display()))?;

    let mut builder = TableBuilder::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }
        let line = record
            .position()
            .map_or(row_idx + 1, |p| p.line() as usize);
        builder.push(record.iter(), line)?;
    }
    builder
        .finish()
        .with_context(|| format!("Failed to parse {}", path.as_ref().display()))
}
