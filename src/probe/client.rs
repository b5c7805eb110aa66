//! Blocking HTTP access to the Target Service
//!
//! Every call is bounded by its own timeout and yields either a fully read
//! [`ProbeResponse`] or a [`CallError`]. Nothing here panics or retries.

use std::error::Error as _;
use std::time::{Duration, Instant};

use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::body::{DecodeError, JsonBody};
use crate::config::ProbeConfig;

/// Why a call produced no response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// The per-call timeout elapsed
    #[error("request timed out after {}s", .after.as_secs())]
    Timeout { after: Duration },
    /// Connection refused, DNS failure, reset, or a body read error
    #[error("{0}")]
    Network(String),
    /// The HTTP client itself could not be built
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl CallError {
    fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            return CallError::Timeout { after: timeout };
        }

        // reqwest's top-level message hides the cause ("error sending request")
        let mut reason = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            reason.push_str(": ");
            reason.push_str(&cause.to_string());
            source = cause.source();
        }
        CallError::Network(reason)
    }
}

/// A response whose body has been read in full
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    status: u16,
    headers: HeaderMap,
    text: String,
}

impl ProbeResponse {
    pub fn new(status: u16, headers: HeaderMap, text: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            text: text.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Header value, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Decodes the body into a tagged JSON shape
    pub fn json(&self) -> Result<JsonBody, DecodeError> {
        JsonBody::parse(&self.text)
    }
}

/// Handle on the Target Service for one run
pub struct Target {
    client: Client,
    config: ProbeConfig,
}

impl Target {
    /// Creates a handle with a fresh HTTP client
    pub fn new(config: ProbeConfig) -> Result<Self, CallError> {
        let mut builder = Client::builder();
        if !config.target.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| CallError::Client(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Starts a request to an API path, using the comprehensive timeout
    pub fn request(&self, method: Method, path: &str) -> ProbeRequest<'_> {
        ProbeRequest {
            target: self,
            method,
            url: self.config.api_url(path),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            timeout: self.config.timeouts.comprehensive(),
        }
    }

    pub fn get(&self, path: &str) -> ProbeRequest<'_> {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> ProbeRequest<'_> {
        self.request(Method::POST, path)
    }

    pub fn options(&self, path: &str) -> ProbeRequest<'_> {
        self.request(Method::OPTIONS, path)
    }
}

enum RequestBody {
    Json(Value),
    Raw(String),
}

/// A single request being assembled
pub struct ProbeRequest<'a> {
    target: &'a Target,
    method: Method,
    url: String,
    query: Vec<(String, String)>,
    headers: Vec<(HeaderName, String)>,
    body: Option<RequestBody>,
    timeout: Duration,
}

impl ProbeRequest<'_> {
    pub fn header(mut self, name: HeaderName, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Appends a URL-encoded query parameter
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Sends `body` serialized as JSON
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Sends `body` verbatim, labelled as JSON whether or not it parses
    pub fn raw_json(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Raw(body.into()));
        self
    }

    /// Declares a JSON request without a body
    pub fn json_content_type(self) -> Self {
        self.header(CONTENT_TYPE, "application/json")
    }

    /// Attaches the mock bearer token when the run is configured to send it
    pub fn mock_auth(self) -> Self {
        let auth = &self.target.config.auth;
        if !auth.send_mock_token {
            return self;
        }
        let value = format!("Bearer {}", auth.mock_token);
        self.header(AUTHORIZATION, value)
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Performs the call and reads the whole body
    pub fn send(self) -> Result<ProbeResponse, CallError> {
        let started = Instant::now();
        let mut builder = self
            .target
            .client
            .request(self.method.clone(), &self.url)
            .timeout(self.timeout);

        if !self.query.is_empty() {
            builder = builder.query(&self.query);
        }

        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }

        builder = match self.body {
            Some(RequestBody::Json(value)) => builder.json(&value),
            Some(RequestBody::Raw(text)) => {
                builder.header(CONTENT_TYPE, "application/json").body(text)
            }
            None => builder,
        };

        let outcome = builder.send().and_then(|resp| {
            let status = resp.status().as_u16();
            let headers = resp.headers().clone();
            let text = resp.text()?;
            Ok(ProbeResponse::new(status, headers, text))
        });

        match outcome {
            Ok(response) => {
                debug!(
                    method = %self.method,
                    url = %self.url,
                    status = response.status(),
                    elapsed = ?started.elapsed(),
                    "Probe call completed"
                );
                Ok(response)
            }
            Err(e) => {
                let error = CallError::from_reqwest(e, self.timeout);
                warn!(
                    method = %self.method,
                    url = %self.url,
                    error = %error,
                    "Probe call failed"
                );
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_timeout_message_uses_whole_seconds() {
        let err = CallError::Timeout {
            after: Duration::from_secs(5),
        };
        assert_eq!(err.to_string(), "request timed out after 5s");
    }

    #[test]
    fn test_response_header_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("access-control-allow-origin", HeaderValue::from_static("*"));
        let response = ProbeResponse::new(204, headers, "");
        assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn test_request_urls_use_api_prefix() {
        let target = Target::new(ProbeConfig::for_base_url("http://127.0.0.1:1")).unwrap();
        let request = target.get("/users/search?q=test");
        assert_eq!(request.url, "http://127.0.0.1:1/api/users/search?q=test");
        assert_eq!(request.timeout, Duration::from_secs(10));
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_query_pairs_are_kept_apart_from_path() {
        let target = Target::new(ProbeConfig::for_base_url("http://127.0.0.1:1")).unwrap();
        let request = target.get("/users/search").query("q", "a&b c");
        assert_eq!(request.url, "http://127.0.0.1:1/api/users/search");
        assert_eq!(request.query, [("q".to_string(), "a&b c".to_string())]);
    }

    #[test]
    fn test_mock_auth_only_when_enabled() {
        let mut config = ProbeConfig::default();
        let target = Target::new(config.clone()).unwrap();
        assert!(target.get("/users/profile").mock_auth().headers.is_empty());

        config.auth.send_mock_token = true;
        let target = Target::new(config).unwrap();
        let request = target.get("/users/profile").mock_auth();
        assert_eq!(request.headers.len(), 1);
        let (name, value) = &request.headers[0];
        assert_eq!(*name, AUTHORIZATION);
        assert_eq!(value, "Bearer mock-firebase-jwt-token");
    }
}
