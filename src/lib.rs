//! Cosmivity API Probes
//!
//! Black-box smoke tests for the Cosmivity backend HTTP API.

/// Build-time information (timestamp, target, compiler)
pub mod build_info;

/// Probe settings - defaults, profiles, and environment overrides
pub mod config;

/// Diagnostic logging setup shared by the binaries
pub mod logging;

/// Comprehensive probe suite - probes, runner, ledger, and reporting
pub mod probe;

/// Quick probe sequence with immediate console verdicts
pub mod quick;
