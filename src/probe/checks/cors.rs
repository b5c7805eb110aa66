//! CORS preflight probe

use reqwest::header::{ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN};

use super::request_error;
use crate::probe::check::{Probe, Verdict};
use crate::probe::client::Target;

/// Sends an `OPTIONS /health` preflight and looks for an allow-origin header
#[derive(Debug, Default)]
pub struct CorsProbe;

impl Probe for CorsProbe {
    fn name(&self) -> &'static str {
        "CORS Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Preflight answers 200/204 with Access-Control-Allow-Origin")
    }

    fn run(&self, target: &Target) -> Verdict {
        let origin = target.config().target.origin.clone();
        let response = match target.options("/health").header(ORIGIN, origin).send() {
            Ok(response) => response,
            Err(e) => return request_error(&e),
        };

        match response.status() {
            200 | 204 => {
                let allowed = response
                    .header(ACCESS_CONTROL_ALLOW_ORIGIN.as_str())
                    .unwrap_or_default();
                if allowed.is_empty() {
                    Verdict::fail("CORS headers missing")
                } else {
                    Verdict::pass("CORS headers present")
                }
            }
            status => Verdict::fail(format!("Preflight failed: {}", status)),
        }
    }
}
