//! Quick probe sequence
//!
//! A lighter pass over the most important endpoints. There is no ledger and
//! no aggregate verdict: every probe prints its own result as soon as it
//! completes.

use std::time::Duration;

use colored::Colorize;
use reqwest::Method;
use serde_json::{Value, json};

use crate::config::ProbeConfig;
use crate::probe::{CallError, ProbeResponse, Target};

const PREVIEW_JSON_CHARS: usize = 200;
const PREVIEW_TEXT_CHARS: usize = 100;
const EXCERPT_CHARS: usize = 200;

/// What a quick probe counts as success
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// Exactly this status code
    Status(u16),
    /// The route must reject the anonymous request with 401
    Unauthorized,
}

/// One quick request/verdict unit
#[derive(Debug, Clone)]
pub struct QuickProbe {
    pub name: &'static str,
    method: Method,
    path: &'static str,
    body: Option<Value>,
    expectation: Expectation,
    timeout: Duration,
}

impl QuickProbe {
    /// A `GET` expected to answer with `expected`
    pub fn endpoint(
        name: &'static str,
        path: &'static str,
        expected: u16,
        timeout: Duration,
    ) -> Self {
        Self {
            name,
            method: Method::GET,
            path,
            body: None,
            expectation: Expectation::Status(expected),
            timeout,
        }
    }

    /// A request that must be rejected for lack of credentials
    pub fn auth_gated(
        name: &'static str,
        method: Method,
        path: &'static str,
        body: Option<Value>,
        timeout: Duration,
    ) -> Self {
        Self {
            name,
            method,
            path,
            body,
            expectation: Expectation::Unauthorized,
            timeout,
        }
    }

    /// Line printed before the request goes out
    pub fn announce(&self) -> String {
        match self.expectation {
            Expectation::Status(_) => format!("Testing {}...", self.name),
            Expectation::Unauthorized => format!("Testing {} (should require auth)...", self.name),
        }
    }

    /// Performs the request and classifies the outcome
    pub fn run(&self, target: &Target) -> QuickVerdict {
        let mut request = target
            .request(self.method.clone(), self.path)
            .timeout(self.timeout);
        if let Some(body) = &self.body {
            request = request.json(body.clone());
        }
        let outcome = request.send();

        match (self.expectation, outcome) {
            (Expectation::Unauthorized, Ok(response)) if response.status() == 401 => {
                QuickVerdict::AuthEnforced
            }
            (Expectation::Unauthorized, Ok(response)) => QuickVerdict::AuthMissing {
                got: response.status(),
            },
            (Expectation::Status(expected), Ok(response)) if response.status() == expected => {
                QuickVerdict::Success {
                    status: response.status(),
                    preview: preview(&response),
                }
            }
            (Expectation::Status(expected), Ok(response)) => QuickVerdict::Mismatch {
                expected,
                got: response.status(),
                excerpt: truncate(response.text(), EXCERPT_CHARS),
            },
            (Expectation::Status(_), Err(CallError::Timeout { after })) => {
                QuickVerdict::Timeout { after }
            }
            (_, Err(e)) => QuickVerdict::Error(e.to_string()),
        }
    }
}

/// Classified outcome of a quick probe
#[derive(Debug, Clone, PartialEq)]
pub enum QuickVerdict {
    /// Expected status; `preview` is the truncated body
    Success { status: u16, preview: String },
    Mismatch {
        expected: u16,
        got: u16,
        excerpt: String,
    },
    AuthEnforced,
    AuthMissing { got: u16 },
    Timeout { after: Duration },
    Error(String),
}

impl QuickVerdict {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            QuickVerdict::Success { .. } | QuickVerdict::AuthEnforced
        )
    }

    /// Console lines for this verdict
    pub fn lines(&self, name: &str) -> Vec<String> {
        match self {
            QuickVerdict::Success { status, preview } => {
                let label = "SUCCESS".green();
                vec![
                    format!("✅ {name}: {label} (Status: {status})"),
                    format!("   Response: {preview}..."),
                ]
            }
            QuickVerdict::Mismatch {
                expected,
                got,
                excerpt,
            } => {
                let label = "FAILED".red();
                vec![
                    format!("❌ {name}: {label} (Expected: {expected}, Got: {got})"),
                    format!("   Response: {excerpt}"),
                ]
            }
            QuickVerdict::AuthEnforced => {
                let label = "SUCCESS".green();
                vec![format!("✅ {name}: {label} (Correctly requires auth)")]
            }
            QuickVerdict::AuthMissing { got } => {
                let label = "FAILED".red();
                vec![format!("❌ {name}: {label} (Expected 401, got {got})")]
            }
            QuickVerdict::Timeout { after } => {
                let label = "TIMEOUT".yellow();
                vec![format!("⏰ {name}: {label} (>{}s)", after.as_secs())]
            }
            QuickVerdict::Error(reason) => {
                let label = "ERROR".red();
                vec![format!("❌ {name}: {label} - {reason}")]
            }
        }
    }
}

/// A step of the quick sequence
#[derive(Debug, Clone)]
pub enum QuickStep {
    /// Heading printed between groups of probes
    Section(&'static str),
    Probe(QuickProbe),
}

/// The quick sequence, in its fixed order
pub fn quick_suite(config: &ProbeConfig) -> Vec<QuickStep> {
    let fast = config.timeouts.quick();
    let slow = config.timeouts.quick_slow();

    vec![
        QuickStep::Probe(QuickProbe::endpoint("Health Check", "/health", 200, fast)),
        QuickStep::Probe(QuickProbe::endpoint(
            "404 Handler",
            "/nonexistent",
            404,
            fast,
        )),
        QuickStep::Probe(QuickProbe::auth_gated(
            "User Profile",
            Method::GET,
            "/users/profile",
            None,
            fast,
        )),
        QuickStep::Probe(QuickProbe::auth_gated(
            "Room Creation",
            Method::POST,
            "/rooms",
            Some(json!({ "name": "Test" })),
            fast,
        )),
        QuickStep::Section("🔥 Testing Firebase-dependent endpoints..."),
        QuickStep::Probe(QuickProbe::endpoint(
            "Public Rooms",
            "/rooms/public",
            200,
            slow,
        )),
        QuickStep::Probe(QuickProbe::endpoint(
            "User Search",
            "/users/search?q=test",
            200,
            slow,
        )),
    ]
}

/// Runs the quick sequence, printing as it goes
pub fn run_quick(target: &Target) -> Vec<(&'static str, QuickVerdict)> {
    let mut verdicts = Vec::new();

    for step in quick_suite(target.config()) {
        match step {
            QuickStep::Section(heading) => println!("\n{}", heading),
            QuickStep::Probe(probe) => {
                println!("{}", probe.announce());
                let verdict = probe.run(target);
                for line in verdict.lines(probe.name) {
                    println!("{}", line);
                }
                verdicts.push((probe.name, verdict));
            }
        }
    }

    verdicts
}

fn preview(response: &ProbeResponse) -> String {
    match response.json() {
        Ok(body) => match serde_json::to_string_pretty(&body.into_value()) {
            Ok(pretty) => truncate(&pretty, PREVIEW_JSON_CHARS),
            Err(_) => truncate(response.text(), PREVIEW_TEXT_CHARS),
        },
        Err(_) => truncate(response.text(), PREVIEW_TEXT_CHARS),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
