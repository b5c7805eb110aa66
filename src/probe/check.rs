//! Core probe trait and verdict type

use serde_json::Value;

use super::client::Target;

/// Outcome of one probe, before it is recorded in the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// Whether the Target Service behaved as expected
    pub passed: bool,
    /// Brief message describing the result
    pub message: String,
    /// Optional snapshot of the response that justified the verdict
    pub response: Option<Value>,
}

impl Verdict {
    /// Creates a passing verdict
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: message.into(),
            response: None,
        }
    }

    /// Creates a failing verdict
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
            response: None,
        }
    }

    /// Attaches a response snapshot
    pub fn with_response(mut self, response: Value) -> Self {
        self.response = Some(response);
        self
    }
}

/// One request/assert unit against the Target Service
pub trait Probe {
    /// Name shown in the report
    fn name(&self) -> &'static str;

    /// Issue the request(s) and judge the response
    ///
    /// Network failures must be turned into a failing verdict here; a probe
    /// never aborts the run.
    fn run(&self, target: &Target) -> Verdict;

    /// Optional description of the behavior being probed
    fn description(&self) -> Option<&'static str> {
        None
    }
}
