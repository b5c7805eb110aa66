//! User endpoint probes

use uuid::Uuid;

use super::{array_len, expect_not_found, expect_unauthorized, http_failure, request_error};
use crate::probe::check::{Probe, Verdict};
use crate::probe::client::Target;

/// Public user search returns an array, or 400 when it rejects the query
#[derive(Debug)]
pub struct UserSearchProbe {
    query: String,
}

impl UserSearchProbe {
    pub fn new() -> Self {
        Self::with_query("test")
    }

    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

impl Default for UserSearchProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for UserSearchProbe {
    fn name(&self) -> &'static str {
        "User Search"
    }

    fn run(&self, target: &Target) -> Verdict {
        let outcome = target.get("/users/search").query("q", &self.query).send();
        let response = match outcome {
            Ok(response) => response,
            Err(e) => return request_error(&e),
        };

        match response.status() {
            200 => match array_len(&response) {
                Ok(count) => Verdict::pass(format!("Search returned {} results", count)),
                Err(verdict) => verdict,
            },
            400 => Verdict::pass("Search validation working"),
            _ => http_failure(&response),
        }
    }
}

/// Public profile lookup for a freshly generated user id
#[derive(Debug, Default)]
pub struct PublicUserProfileProbe;

impl Probe for PublicUserProfileProbe {
    fn name(&self) -> &'static str {
        "Public User Profile (Not Found)"
    }

    fn run(&self, target: &Target) -> Verdict {
        let path = format!("/users/{}/public", Uuid::new_v4());
        expect_not_found(
            target.get(&path).send(),
            "Correctly handles non-existent user",
        )
    }
}

/// Own-profile access must be rejected without a verified token
#[derive(Debug, Default)]
pub struct UserProfileAuthProbe;

impl Probe for UserProfileAuthProbe {
    fn name(&self) -> &'static str {
        "User Profile Auth Check"
    }

    fn run(&self, target: &Target) -> Verdict {
        expect_unauthorized(
            target.get("/users/profile").mock_auth().send(),
            "Correctly rejected unauthenticated request",
        )
    }
}
