//! Unknown-route handling probe

use super::expect_not_found;
use crate::probe::check::{Probe, Verdict};
use crate::probe::client::Target;

/// Requests a route that does not exist
#[derive(Debug, Default)]
pub struct InvalidRouteProbe;

impl Probe for InvalidRouteProbe {
    fn name(&self) -> &'static str {
        "404 Error Handling"
    }

    fn run(&self, target: &Target) -> Verdict {
        expect_not_found(
            target.get("/nonexistent").send(),
            "Correctly returns 404 for invalid routes",
        )
    }
}
