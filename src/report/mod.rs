//! Console, text and JSON output of operation results.
//!
//! Every result implements [`Render`]; [`ReportSink::emit`] derives all three
//! representations from that one value. Artifact names come from
//! [`Operation::suffix`], so the text and JSON files of an operation always
//! share a base name.

pub mod console;
pub mod operation;

pub use console::{BufferConsole, Console, Line, Style, TerminalConsole};
pub use operation::Operation;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::app::Result;

pub const NO_RESULTS: &str = "Sorry! No results found :-(";

/// A result value that can be printed, written as text and dumped as JSON.
pub trait Render {
    fn operation(&self) -> Operation;

    /// Empty results print [`NO_RESULTS`] and write nothing.
    fn is_empty(&self) -> bool;

    fn console_lines(&self) -> Vec<Line>;

    fn text_lines(&self) -> Vec<String> {
        self.console_lines().into_iter().map(|l| l.text).collect()
    }

    fn dump(&self) -> Value;
}

#[derive(Debug, Clone)]
pub struct ReportSink {
    dir: PathBuf,
    write_text: bool,
    json_dump: bool,
}

impl ReportSink {
    pub fn new(dir: impl Into<PathBuf>, write_text: bool, json_dump: bool) -> Self {
        Self {
            dir: dir.into(),
            write_text,
            json_dump,
        }
    }

    /// Directory artifacts and downloads are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn text_path(&self, target: &str, operation: Operation) -> Option<PathBuf> {
        operation
            .suffix()
            .map(|suffix| self.dir.join(format!("{}_{}.txt", target, suffix)))
    }

    pub fn json_path(&self, target: &str, operation: Operation) -> Option<PathBuf> {
        operation
            .suffix()
            .map(|suffix| self.dir.join(format!("{}_{}.json", target, suffix)))
    }

    pub fn no_results(&self, console: &mut dyn Console) {
        console.say(Style::Error, NO_RESULTS);
    }

    /// Print the summary and write whichever artifacts are enabled.
    /// Returns the paths written.
    pub fn emit<R: Render + ?Sized>(
        &self,
        console: &mut dyn Console,
        target: &str,
        result: &R,
    ) -> Result<Vec<PathBuf>> {
        let operation = result.operation();

        if result.is_empty() {
            tracing::info!(operation = operation.name(), account = target, "No results");
            self.no_results(console);
            return Ok(Vec::new());
        }

        for line in result.console_lines() {
            console.print(&line);
        }

        let mut written = Vec::new();

        if self.write_text {
            if let Some(path) = self.text_path(target, operation) {
                let mut content = result.text_lines().join("\n");
                content.push('\n');
                write_atomic(&path, content.as_bytes())?;
                written.push(path);
            }
        }

        if self.json_dump {
            if let Some(path) = self.json_path(target, operation) {
                let content = serde_json::to_string_pretty(&result.dump())?;
                write_atomic(&path, content.as_bytes())?;
                written.push(path);
            }
        }

        tracing::info!(
            operation = operation.name(),
            account = target,
            artifacts = written.len(),
            "Report emitted"
        );
        Ok(written)
    }
}

/// Write through a sibling temp file so a failure never leaves a truncated
/// artifact in place of an earlier one.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
