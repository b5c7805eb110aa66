//! Built-in probes for the Cosmivity API surface

pub mod cors;
pub mod dependency;
pub mod health;
pub mod rooms;
pub mod routing;
pub mod users;

pub use cors::CorsProbe;
pub use dependency::FirebaseAdminProbe;
pub use health::{HealthProbe, RateLimitProbe};
pub use rooms::{
    JoinRoomAuthProbe, JsonBodyParsingProbe, PublicRoomsProbe, RoomByIdProbe,
    RoomCreationAuthProbe,
};
pub use routing::InvalidRouteProbe;
pub use users::{PublicUserProfileProbe, UserProfileAuthProbe, UserSearchProbe};

use super::check::Verdict;
use super::client::{CallError, ProbeResponse};

type Outcome = Result<ProbeResponse, CallError>;

fn request_error(err: &CallError) -> Verdict {
    Verdict::fail(format!("Request error: {}", err))
}

fn http_failure(response: &ProbeResponse) -> Verdict {
    Verdict::fail(format!("HTTP {}: {}", response.status(), response.text()))
}

/// Only a 401 passes; anything else means the route is not gated
fn expect_unauthorized(outcome: Outcome, success: &str) -> Verdict {
    match outcome {
        Ok(response) if response.status() == 401 => Verdict::pass(success),
        Ok(response) => Verdict::fail(format!("Expected 401, got {}", response.status())),
        Err(e) => request_error(&e),
    }
}

/// A 404 whose JSON body carries an `error` field
fn expect_not_found(outcome: Outcome, success: &str) -> Verdict {
    let response = match outcome {
        Ok(response) => response,
        Err(e) => return request_error(&e),
    };
    if response.status() != 404 {
        return Verdict::fail(format!("Expected 404, got {}", response.status()));
    }

    match response.json() {
        Ok(body) if body.has_field("error") => Verdict::pass(success),
        Ok(_) => Verdict::fail("404 response missing error field"),
        Err(e) => Verdict::fail(format!("404 response is not valid JSON: {}", e)),
    }
}

/// Length of a JSON array body, or the verdict explaining why it is not one
fn array_len(response: &ProbeResponse) -> Result<usize, Verdict> {
    let body = match response.json() {
        Ok(body) => body,
        Err(e) => {
            let reason = format!("Expected array, got invalid JSON: {e}");
            return Err(Verdict::fail(reason));
        }
    };

    match body.as_array() {
        Some(items) => Ok(items.len()),
        None => {
            let reason = format!("Expected array, got: {}", body.kind());
            Err(Verdict::fail(reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderMap;

    fn response(status: u16, body: &str) -> Outcome {
        Ok(ProbeResponse::new(status, HeaderMap::new(), body))
    }

    #[test]
    fn test_unauthorized_accepts_only_401() {
        assert!(expect_unauthorized(response(401, "{}"), "ok").passed);

        for status in [200, 201, 400, 403, 404, 500] {
            let verdict = expect_unauthorized(response(status, "{}"), "ok");
            assert!(!verdict.passed);
            assert_eq!(verdict.message, format!("Expected 401, got {status}"));
        }
    }

    #[test]
    fn test_not_found_requires_error_field() {
        let ok = expect_not_found(response(404, r#"{"error":"Room not found"}"#), "gone");
        assert_eq!(ok, Verdict::pass("gone"));

        let missing = expect_not_found(response(404, "{}"), "gone");
        assert_eq!(missing.message, "404 response missing error field");

        let array = expect_not_found(response(404, r#"[{"error":"x"}]"#), "gone");
        assert_eq!(array.message, "404 response missing error field");

        let html = expect_not_found(response(404, "<h1>Not Found</h1>"), "gone");
        assert!(html.message.starts_with("404 response is not valid JSON: "));

        let wrong = expect_not_found(response(200, r#"{"error":"x"}"#), "gone");
        assert_eq!(wrong.message, "Expected 404, got 200");
    }

    #[test]
    fn test_network_errors_become_request_errors() {
        let outcome = Err(CallError::Network("connection refused".to_string()));
        let verdict = expect_unauthorized(outcome, "ok");
        assert_eq!(verdict, Verdict::fail("Request error: connection refused"));
    }

    #[test]
    fn test_array_len_reports_kind() {
        let ok = ProbeResponse::new(200, HeaderMap::new(), "[1,2,3]");
        assert_eq!(array_len(&ok), Ok(3));

        let object = ProbeResponse::new(200, HeaderMap::new(), r#"{"rooms":[]}"#);
        assert_eq!(
            array_len(&object).unwrap_err().message,
            "Expected array, got: object"
        );
    }
}
