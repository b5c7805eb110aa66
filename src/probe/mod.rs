//! Comprehensive black-box probing of the Cosmivity backend
//!
//! Each probe issues its request(s), judges the response and yields a
//! [`Verdict`]. The [`ProbeRunner`] executes probes strictly in sequence and
//! records every verdict in a [`Ledger`], which prints one line per probe and
//! a summary at the end.
//!
//! # Example
//!
//! ```no_run
//! use cosmivity_probe::config::ProbeConfig;
//! use cosmivity_probe::probe::{self, Target};
//!
//! let target = Target::new(ProbeConfig::default())?;
//! let ledger = probe::comprehensive_suite().run(&target);
//! ledger.summarize();
//! std::process::exit(ledger.exit_code().into());
//! # Ok::<(), cosmivity_probe::probe::CallError>(())
//! ```

pub mod body;
pub mod check;
pub mod checks;
pub mod client;
pub mod ledger;
pub mod reporter;
pub mod runner;

pub use body::{DecodeError, JsonBody};
pub use check::{Probe, Verdict};
pub use client::{CallError, ProbeRequest, ProbeResponse, Target};
pub use ledger::{Ledger, RunSummary, TestResult};
pub use reporter::{format_summary, format_table, print_summary, print_table};
pub use runner::ProbeRunner;

/// The full suite, in its fixed execution order
///
/// Connectivity first, then public endpoints, auth gating, error handling,
/// and infrastructure.
pub fn comprehensive_suite() -> ProbeRunner {
    ProbeRunner::new()
        .add_probe(checks::HealthProbe)
        .add_probe(checks::CorsProbe)
        .add_probe(checks::PublicRoomsProbe)
        .add_probe(checks::UserSearchProbe::new())
        .add_probe(checks::RoomByIdProbe)
        .add_probe(checks::PublicUserProfileProbe)
        .add_probe(checks::RoomCreationAuthProbe)
        .add_probe(checks::UserProfileAuthProbe)
        .add_probe(checks::JoinRoomAuthProbe::new())
        .add_probe(checks::InvalidRouteProbe)
        .add_probe(checks::JsonBodyParsingProbe)
        .add_probe(checks::RateLimitProbe)
        .add_probe(checks::FirebaseAdminProbe)
}
