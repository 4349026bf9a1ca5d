use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::aggregate::ByToStats;
use crate::config::{AddressBook, Config, Mode};
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::models::Summary;
use crate::report;
use crate::source::RecordSource;
use crate::summary::build_summary;

/// Runs the "by to" pass for one mode and owns the resulting summary.
///
/// The summary is built at most once; writing or rendering before
/// [`Analyser::analyse`] has run triggers the pass on demand.
pub struct Analyser<D = TracingDiagnostics> {
    mode: Mode,
    input_path: PathBuf,
    output_path: PathBuf,
    address_book: AddressBook,
    diagnostics: D,
    summary: Option<Summary>,
}

impl Analyser<TracingDiagnostics> {
    pub fn new(config: &Config, mode: Mode) -> Self {
        Self::with_diagnostics(config, mode, TracingDiagnostics)
    }
}

impl<D: Diagnostics> Analyser<D> {
    pub fn with_diagnostics(config: &Config, mode: Mode, diagnostics: D) -> Self {
        Self {
            mode,
            input_path: config.input_path(mode),
            output_path: config.output_path(mode),
            address_book: config.address_book.clone(),
            diagnostics,
            summary: None,
        }
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    /// Reads the input once and replaces any previous summary.
    pub fn analyse(&mut self) -> Result<&Summary> {
        tracing::info!(mode = %self.mode, input = %self.input_path.display(), "analysing");

        let mut stats = ByToStats::new();
        let source = RecordSource::open(&self.input_path, &mut self.diagnostics)?;
        stats
            .consume(&self.address_book, source)
            .with_context(|| format!("failed reading {}", self.input_path.display()))?;

        let summary = build_summary(
            self.mode.as_str(),
            &self.input_path,
            &self.address_book,
            &stats,
        );
        tracing::info!(
            total = summary.input.total_transactions,
            relay = stats.relay(),
            weth_helper = stats.weth_helper(),
            other = stats.other(),
            "analysis complete"
        );
        Ok(&*self.summary.insert(summary))
    }

    fn ensure_summary(&mut self) -> Result<&Summary> {
        if self.summary.is_none() {
            self.analyse()?;
        }
        self.summary
            .as_ref()
            .context("summary missing after analysis")
    }

    pub fn write_summary(&mut self) -> Result<()> {
        let output_path = self.output_path.clone();
        let summary = self.ensure_summary()?;
        report::write_summary(&output_path, summary)?;
        tracing::info!("summary written to {}", output_path.display());
        Ok(())
    }

    pub fn render_summary(&mut self) -> Result<String> {
        let output_path = self.output_path.clone();
        let summary = self.ensure_summary()?;
        Ok(report::render_console(summary, &output_path))
    }
}
