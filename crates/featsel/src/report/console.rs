use std::io::{self, Write};

use crate::feature_selection::Reporter;
use crate::subset::FeatureSubset;

/// `{1,3,4}`: ascending, 1-based, comma separated.
pub fn format_subset(subset: &FeatureSubset) -> String {
    let inner = subset
        .iter()
        .map(|idx| (idx + 1).to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{}}}", inner)
}

/// Accuracy as a percentage with one decimal, e.g. `85.0%`.
pub fn format_accuracy(accuracy: f64) -> String {
    format!("{:.1}%", accuracy * 100.0)
}

/// Prints search progress as plain text lines.
///
/// Reporting must never interrupt a search, so write failures are kept and
/// handed back by `into_inner` instead of being raised mid-run.
pub struct ConsoleReporter<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        ConsoleReporter { out, error: None }
    }

    /// Hand back the writer, or the first write error seen.
    pub fn into_inner(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn line(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{}", text) {
            log::warn!("Failed to write search progress: {}", err);
            self.error = Some(err);
        }
    }
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_initial(&mut self, subset: &FeatureSubset, accuracy: f64) {
        let what = if subset.is_empty() {
            "no features".to_string()
        } else {
            format!("feature(s) {}", format_subset(subset))
        };
        self.line(&format!(
            "Running nearest neighbor with {}, using \"leaving-one-out\" evaluation, I get an accuracy of {}",
            what,
            format_accuracy(accuracy)
        ));
        self.line("");
        self.line("Beginning search.");
        self.line("");
    }

    fn on_candidate(&mut self, subset: &FeatureSubset, accuracy: f64) {
        self.line(&format!(
            "\tUsing feature(s) {} accuracy is {}",
            format_subset(subset),
            format_accuracy(accuracy)
        ));
    }

    fn on_level_chosen(&mut self, subset: &FeatureSubset, accuracy: f64, decreased: bool) {
        self.line("");
        if decreased {
            self.line(
                "(Warning, Accuracy has decreased! Continuing search in case of local maxima)",
            );
        }
        self.line(&format!(
            "Feature set {} was best, accuracy is {}",
            format_subset(subset),
            format_accuracy(accuracy)
        ));
        self.line("");
    }

    fn on_finished(&mut self, best_subset: &FeatureSubset, best_accuracy: f64) {
        self.line(&format!(
            "Finished search!! The best feature subset is {}, which has an accuracy of {}",
            format_subset(best_subset),
            format_accuracy(best_accuracy)
        ));
    }
}
