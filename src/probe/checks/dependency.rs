//! Indirect check of the backend's Firebase Admin initialization

use super::request_error;
use crate::probe::check::{Probe, Verdict};
use crate::probe::client::Target;

/// Public rooms are served from Firestore, so a 200 implies Firebase is up
#[derive(Debug, Default)]
pub struct FirebaseAdminProbe;

impl Probe for FirebaseAdminProbe {
    fn name(&self) -> &'static str {
        "Firebase Admin SDK"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Firebase-backed endpoint answers without a server error")
    }

    fn run(&self, target: &Target) -> Verdict {
        let response = match target.get("/rooms/public").send() {
            Ok(response) => response,
            Err(e) => return request_error(&e),
        };

        match response.status() {
            200 => Verdict::pass("Firebase-dependent endpoints working"),
            500 => match response.json() {
                Ok(body) if body.to_string().to_lowercase().contains("firebase") => {
                    Verdict::fail("Firebase initialization issue detected")
                }
                Ok(body) => Verdict::fail(format!("Server error: {}", body)),
                Err(_) => Verdict::fail("Server error (possibly Firebase-related)"),
            },
            status => Verdict::fail(format!("Unexpected response: {}", status)),
        }
    }
}
