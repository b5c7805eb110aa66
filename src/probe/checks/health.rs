//! Health endpoint probes

use std::thread;

use serde_json::Value;

use super::{http_failure, request_error};
use crate::probe::check::{Probe, Verdict};
use crate::probe::client::Target;

/// Checks that `GET /health` answers `{"status": "OK"}`
#[derive(Debug, Default)]
pub struct HealthProbe;

impl Probe for HealthProbe {
    fn name(&self) -> &'static str {
        "Health Check"
    }

    fn description(&self) -> Option<&'static str> {
        Some("GET /health returns 200 with status OK")
    }

    fn run(&self, target: &Target) -> Verdict {
        let response = match target.get("/health").send() {
            Ok(response) => response,
            Err(e) => return Verdict::fail(format!("Connection error: {}", e)),
        };
        if response.status() != 200 {
            return http_failure(&response);
        }

        match response.json() {
            Ok(body) if body.field("status").and_then(Value::as_str) == Some("OK") => {
                Verdict::pass("Health endpoint working correctly")
                    .with_response(body.into_value())
            }
            Ok(body) => Verdict::fail(format!("Invalid health response: {}", body)),
            Err(_) => Verdict::fail(format!("Invalid health response: {}", response.text())),
        }
    }
}

/// Fires a short paced burst at `/health`; every call must return 200
///
/// This detects over-eager throttling. It does not prove a limiter exists.
#[derive(Debug, Default)]
pub struct RateLimitProbe;

impl Probe for RateLimitProbe {
    fn name(&self) -> &'static str {
        "Rate Limiting"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Paced burst of health requests is never throttled")
    }

    fn run(&self, target: &Target) -> Verdict {
        let settings = &target.config().rate_limit;
        let timeout = target.config().timeouts.rate_limit();
        let mut statuses = Vec::with_capacity(settings.burst as usize);

        for _ in 0..settings.burst {
            match target.get("/health").timeout(timeout).send() {
                Ok(response) => statuses.push(response.status()),
                Err(e) => return request_error(&e),
            }
            thread::sleep(settings.pacing());
        }

        if statuses.iter().all(|status| *status == 200) {
            Verdict::pass("Rate limiting configured (health endpoint accessible)")
        } else {
            Verdict::fail(format!("Unexpected responses: {:?}", statuses))
        }
    }
}
