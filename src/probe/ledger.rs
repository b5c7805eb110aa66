//! In-memory result ledger for one comprehensive run

use chrono::{DateTime, Local, SecondsFormat};
use serde_json::Value;

use super::check::Verdict;
use super::reporter;

/// One recorded probe outcome
#[derive(Debug, Clone)]
pub struct TestResult {
    pub test_name: String,
    pub passed: bool,
    pub message: String,
    /// When the result was recorded
    pub timestamp: DateTime<Local>,
    /// Snapshot of the response, when the probe kept one
    pub response: Option<Value>,
}

impl TestResult {
    /// `✅ PASS` or `❌ FAIL`
    pub fn status_label(&self) -> &'static str {
        if self.passed { "✅ PASS" } else { "❌ FAIL" }
    }

    /// ISO-8601 timestamp with microseconds and offset
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, false)
    }
}

/// Pass/fail counts for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl RunSummary {
    /// Percentage of passing probes, undefined when nothing ran
    pub fn success_rate(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.passed as f64 / self.total as f64 * 100.0)
    }
}

/// Accumulates results in recording order
#[derive(Debug, Default)]
pub struct Ledger {
    results: Vec<TestResult>,
    summary: RunSummary,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a result and prints its status line
    pub fn record(
        &mut self,
        name: impl Into<String>,
        passed: bool,
        message: impl Into<String>,
        response: Option<Value>,
    ) -> &TestResult {
        self.summary.total += 1;
        if passed {
            self.summary.passed += 1;
        } else {
            self.summary.failed += 1;
        }

        let result = TestResult {
            test_name: name.into(),
            passed,
            message: message.into(),
            timestamp: Local::now(),
            response,
        };
        println!("{}", reporter::format_record(&result));

        self.results.push(result);
        &self.results[self.results.len() - 1]
    }

    /// Records a probe verdict under `name`
    pub fn record_verdict(&mut self, name: &str, verdict: Verdict) -> &TestResult {
        self.record(name, verdict.passed, verdict.message, verdict.response)
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    /// Failing results in recording order
    pub fn failures(&self) -> impl Iterator<Item = &TestResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Returns true if no recorded probe failed
    pub fn is_clean(&self) -> bool {
        self.summary.failed == 0
    }

    /// 0 = all pass, 1 = any fail
    pub fn exit_code(&self) -> u8 {
        if self.is_clean() { 0 } else { 1 }
    }

    /// Prints the end-of-run summary
    pub fn summarize(&self) {
        reporter::print_summary(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_counts_stay_consistent_after_every_record() {
        let mut ledger = Ledger::new();
        let outcomes = [true, false, true, true, false];

        for (i, passed) in outcomes.into_iter().enumerate() {
            ledger.record(format!("probe {i}"), passed, "msg", None);
            let summary = ledger.summary();
            assert_eq!(summary.total, i + 1);
            assert_eq!(summary.total, summary.passed + summary.failed);
        }

        assert_eq!(ledger.summary().failed, 2);
        assert_eq!(ledger.results().len(), 5);
    }

    #[test]
    fn test_failures_keep_recording_order() {
        let mut ledger = Ledger::new();
        ledger.record("first", false, "boom", None);
        ledger.record("second", true, "ok", None);
        ledger.record("third", false, "bang", None);

        let names: Vec<_> = ledger.failures().map(|r| r.test_name.as_str()).collect();
        assert_eq!(names, ["first", "third"]);
    }

    #[test]
    fn test_record_verdict_keeps_snapshot() {
        let mut ledger = Ledger::new();
        let verdict = Verdict::pass("fine").with_response(json!({"count": 2}));
        let result = ledger.record_verdict("Public Rooms Fetch", verdict);

        assert!(result.passed);
        assert_eq!(result.status_label(), "✅ PASS");
        assert_eq!(result.response, Some(json!({"count": 2})));
    }

    #[test]
    fn test_exit_code() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.exit_code(), 0);
        ledger.record("a", true, "", None);
        assert_eq!(ledger.exit_code(), 0);
        ledger.record("b", false, "", None);
        assert_eq!(ledger.exit_code(), 1);
    }

    #[test]
    fn test_success_rate_undefined_without_results() {
        assert_eq!(RunSummary::default().success_rate(), None);

        let summary = RunSummary {
            total: 13,
            passed: 12,
            failed: 1,
        };
        let rate = summary.success_rate().unwrap();
        assert!((rate - 92.307).abs() < 0.01);
    }

    #[test]
    fn test_timestamp_is_iso_8601() {
        let mut ledger = Ledger::new();
        let stamp = ledger.record("a", true, "", None).timestamp_iso();
        assert!(DateTime::parse_from_rfc3339(&stamp).is_ok());
    }
}
