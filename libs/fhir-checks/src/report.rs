//! Tagged line output.
//!
//! Check output is the product surface of a run: one tagged line per event,
//! in processing order, closed by a summary. Diagnostics go through
//! `tracing` instead, so stdout stays machine-greppable.

use crate::outcome::RunSummary;
use std::fmt::Display;
use std::io::Write;

const RULE: &str = "--------------------------------------------";

/// Writes tagged check lines to any sink (stdout in the CLI, a buffer in
/// tests). Write errors are ignored; a broken pipe must not turn a check
/// result into a crash.
pub struct Reporter<'w> {
    out: &'w mut dyn Write,
}

impl<'w> Reporter<'w> {
    pub fn new(out: &'w mut dyn Write) -> Self {
        Self { out }
    }

    pub fn ok(&mut self, message: impl Display) {
        self.line("OK", message);
    }

    pub fn warn(&mut self, message: impl Display) {
        self.line("WARN", message);
    }

    pub fn fail(&mut self, message: impl Display) {
        self.line("FAIL", message);
    }

    pub fn info(&mut self, message: impl Display) {
        self.line("INFO", message);
    }

    /// Rule, `[SUMMARY] {scope}: OK=a | WARN=b | FAIL=c`, and - when there
    /// are failures - the ordered failing labels under a `[DETAIL]` header.
    pub fn summary(&mut self, scope: &str, summary: &RunSummary) {
        let _ = writeln!(self.out, "{RULE}");
        let _ = writeln!(
            self.out,
            "[SUMMARY] {scope}: OK={} | WARN={} | FAIL={}",
            summary.ok, summary.warn, summary.fail
        );
        if !summary.failures.is_empty() {
            let _ = writeln!(self.out, "[DETAIL] failing checks:");
            for label in &summary.failures {
                let _ = writeln!(self.out, "{label}");
            }
        }
    }

    fn line(&mut self, tag: &str, message: impl Display) {
        let _ = writeln!(self.out, "[{tag}] {message}");
    }
}
