//! Sequential orchestration of probes

use std::time::Instant;

use tracing::{debug, info};

use super::check::Probe;
use super::client::Target;
use super::ledger::Ledger;

/// Runs registered probes one after another, in registration order
pub struct ProbeRunner {
    probes: Vec<Box<dyn Probe>>,
}

impl ProbeRunner {
    /// Creates a new runner with no probes
    pub fn new() -> Self {
        Self { probes: Vec::new() }
    }

    /// Adds a probe to the end of the sequence
    pub fn add_probe<P: Probe + 'static>(mut self, probe: P) -> Self {
        self.probes.push(Box::new(probe));
        self
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    /// Probe names in execution order
    pub fn names(&self) -> Vec<&'static str> {
        self.probes.iter().map(|p| p.name()).collect()
    }

    /// Runs every probe against `target` and returns the filled ledger
    pub fn run(&self, target: &Target) -> Ledger {
        let mut ledger = Ledger::new();
        info!(
            probes = self.probes.len(),
            base_url = %target.config().target.base_url,
            "Starting probe run"
        );

        for probe in &self.probes {
            let start = Instant::now();
            let verdict = probe.run(target);
            debug!(
                probe = probe.name(),
                description = probe.description().unwrap_or_default(),
                passed = verdict.passed,
                elapsed = ?start.elapsed(),
                "Probe finished"
            );
            ledger.record_verdict(probe.name(), verdict);
        }

        let summary = ledger.summary();
        info!(
            total = summary.total,
            passed = summary.passed,
            failed = summary.failed,
            "Probe run finished"
        );
        ledger
    }
}

impl Default for ProbeRunner {
    fn default() -> Self {
        Self::new()
    }
}
