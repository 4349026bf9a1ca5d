use std::path::{Path, PathBuf};

/// Receives the non-fatal conditions noticed while reading input.
pub trait Diagnostics {
    fn invalid_line(&mut self, line_no: usize, error: &serde_json::Error);
    fn missing_input(&mut self, path: &Path);
}

/// Default sink: everything goes to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn invalid_line(&mut self, line_no: usize, error: &serde_json::Error) {
        tracing::warn!(line = line_no, "Skip invalid JSON line: {}", error);
    }

    fn missing_input(&mut self, path: &Path) {
        tracing::error!("Input file not found: {}", path.display());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    InvalidLine { line_no: usize, message: String },
    MissingInput(PathBuf),
}

/// Keeps every diagnostic in memory, in the order raised.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    pub entries: Vec<Diagnostic>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalid_lines(&self) -> Vec<usize> {
        self.entries
            .iter()
            .filter_map(|d| match d {
                Diagnostic::InvalidLine { line_no, .. } => Some(*line_no),
                Diagnostic::MissingInput(_) => None,
            })
            .collect()
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn invalid_line(&mut self, line_no: usize, error: &serde_json::Error) {
        self.entries.push(Diagnostic::InvalidLine {
            line_no,
            message: error.to_string(),
        });
    }

    fn missing_input(&mut self, path: &Path) {
        self.entries.push(Diagnostic::MissingInput(path.to_path_buf()));
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn invalid_line(&mut self, line_no: usize, error: &serde_json::Error) {
        (**self).invalid_line(line_no, error)
    }

    fn missing_input(&mut self, path: &Path) {
        (**self).missing_input(path)
    }
}
