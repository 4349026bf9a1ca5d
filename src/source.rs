//! NDJSON record source.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::diagnostics::Diagnostics;
use crate::models::Record;

/// Lazily yields the JSON objects of a line-oriented stream.
///
/// Blank lines are skipped, lines holding valid JSON that is not an object are
/// dropped, and lines that fail to parse are reported to the diagnostic sink
/// and skipped. Read errors end the pass.
///
/// `\n`, `\r\n` and a bare `\r` all end a line.
pub struct RecordSource<R, D> {
    lines: Option<Lines<R>>,
    // Lines split off a physical read at bare `\r` separators.
    pending: VecDeque<String>,
    line_no: usize,
    diagnostics: D,
}

impl<R: BufRead, D: Diagnostics> RecordSource<R, D> {
    pub fn new(reader: R, diagnostics: D) -> Self {
        Self {
            lines: Some(reader.lines()),
            pending: VecDeque::new(),
            line_no: 0,
            diagnostics,
        }
    }

    pub fn into_diagnostics(self) -> D {
        self.diagnostics
    }
}

impl<D: Diagnostics> RecordSource<BufReader<File>, D> {
    /// Opens `path`. A missing file yields an empty source after raising a
    /// `missing_input` diagnostic.
    pub fn open(path: &Path, mut diagnostics: D) -> Result<Self> {
        if !path.exists() {
            diagnostics.missing_input(path);
            return Ok(Self {
                lines: None,
                pending: VecDeque::new(),
                line_no: 0,
                diagnostics,
            });
        }

        let file = File::open(path)
            .with_context(|| format!("failed to open input file {}", path.display()))?;
        Ok(Self::new(BufReader::new(file), diagnostics))
    }
}

impl<R, D> RecordSource<R, D> {
    /// Returns the first segment of `line` and queues the rest.
    fn split_bare_cr(&mut self, line: String) -> String {
        if !line.contains('\r') {
            return line;
        }
        let mut parts = line.split('\r').map(str::to_string);
        let first = parts.next().unwrap_or_default();
        self.pending.extend(parts);
        first
    }
}

impl<R: BufRead, D: Diagnostics> Iterator for RecordSource<R, D> {
    type Item = io::Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.pending.pop_front() {
                Some(line) => line,
                None => {
                    let read = self.lines.as_mut()?.next()?;
                    match read {
                        Ok(line) => self.split_bare_cr(line),
                        Err(e) => {
                            self.lines = None;
                            return Some(Err(e));
                        }
                    }
                }
            };
            self.line_no += 1;

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<Value>(line) {
                Ok(Value::Object(record)) => return Some(Ok(record)),
                Ok(_) => continue,
                Err(e) => {
                    self.diagnostics.invalid_line(self.line_no, &e);
                    continue;
                }
            }
        }
    }
}
