//! Verification outcomes and the run summary.

use crate::report::Reporter;

/// Terminal outcome of one verified record.
///
/// FAIL: the dependent call errored, came back with an unexpected shape, or
/// yielded no actionable data. WARN: the call succeeded but an optional
/// signal was absent. OK: full success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Ok,
    Warn,
    Fail,
}

/// Aggregate counts plus the ordered labels of failing records.
///
/// Every record that reaches verification ends in exactly one
/// [`record`](Self::record) call, which prints the tagged line and bumps
/// exactly one counter - records skipped by classification never touch the
/// counts.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub ok: u32,
    pub warn: u32,
    pub fail: u32,
    /// Labels of failing records, in processing order
    pub failures: Vec<String>,
}

impl RunSummary {
    /// Emit the verdict line for one record and count it.
    pub fn record(&mut self, report: &mut Reporter<'_>, verdict: Verdict, label: impl Into<String>) {
        let label = label.into();
        match verdict {
            Verdict::Ok => {
                report.ok(&label);
                self.ok += 1;
            }
            Verdict::Warn => {
                report.warn(&label);
                self.warn += 1;
            }
            Verdict::Fail => {
                report.fail(&label);
                self.fail += 1;
                self.failures.push(label);
            }
        }
    }

    /// Whether the run must exit non-zero. WARNs never fail a run.
    pub fn has_failures(&self) -> bool {
        self.fail > 0
    }
}
