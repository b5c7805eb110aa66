//! In-process stand-in for the Cosmivity backend
#![allow(dead_code)]

use std::future::{Ready, ready};
use std::net::TcpListener as StdTcpListener;
use std::sync::{Arc, Mutex};

use axum::http::{HeaderMap, HeaderName, Method, StatusCode, Uri, header};
use axum::response::AppendHeaders;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::runtime::Runtime;

use cosmivity_probe::config::ProbeConfig;
use cosmivity_probe::probe::Target;

/// A mock server bound to an ephemeral local port
///
/// The server lives as long as this value.
pub struct MockService {
    base_url: String,
    _runtime: Runtime,
}

impl MockService {
    pub fn start(router: Router) -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("failed to build mock runtime");

        let listener = runtime
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .expect("failed to bind mock listener");
        let addr = listener.local_addr().expect("mock listener has no address");

        runtime.spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("mock server stopped");
        });

        Self {
            base_url: format!("http://{}", addr),
            _runtime: runtime,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> ProbeConfig {
        ProbeConfig::for_base_url(self.base_url.clone())
    }

    pub fn target(&self) -> Target {
        target_for(self.config())
    }
}

pub fn target_for(config: ProbeConfig) -> Target {
    Target::new(config).expect("failed to build target")
}

/// Base URL of a local port that nothing listens on
pub fn unreachable_base_url() -> String {
    let listener = StdTcpListener::bind("127.0.0.1:0").expect("no free port");
    let port = listener.local_addr().expect("no local address").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

type Canned = (StatusCode, Json<Value>);

/// A request as the mock backend received it
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: String,
}

impl SeenRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Decoded value of a query parameter
    pub fn query_param(&self, name: &str) -> Option<String> {
        let url = format!("http://mock{}", self.uri);
        let url = reqwest::Url::parse(&url).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

/// Every request the mock backend answered, oldest first
#[derive(Debug, Clone, Default)]
pub struct RequestLog(Arc<Mutex<Vec<SeenRequest>>>);

impl RequestLog {
    fn push(&self, request: SeenRequest) {
        self.0.lock().expect("request log poisoned").push(request);
    }

    /// Requests whose path is exactly `path`
    pub fn to(&self, path: &str) -> Vec<SeenRequest> {
        self.0
            .lock()
            .expect("request log poisoned")
            .iter()
            .filter(|request| request.uri.path() == path)
            .cloned()
            .collect()
    }

    /// The only request made to `path`
    pub fn single(&self, path: &str) -> SeenRequest {
        let mut seen = self.to(path);
        assert_eq!(seen.len(), 1, "expected one request to {path}: {seen:?}");
        seen.remove(0)
    }
}

fn canned(
    log: RequestLog,
    status: StatusCode,
    body: Value,
) -> impl Fn(Method, Uri, HeaderMap, String) -> Ready<Canned> + Clone + Send + Sync {
    move |method, uri, headers, text| {
        log.push(SeenRequest {
            method,
            uri,
            headers,
            body: text,
        });
        ready((status, Json(body.clone())))
    }
}

/// Scripted responses for each route the probes touch
///
/// `Backend::default()` behaves the way the real backend does when healthy.
/// Every request it answers is appended to `log`.
#[derive(Debug, Clone)]
pub struct Backend {
    pub health: (StatusCode, Value),
    pub allow_origin: Option<&'static str>,
    pub public_rooms: (StatusCode, Value),
    pub user_search: (StatusCode, Value),
    pub room_lookup: (StatusCode, Value),
    pub user_lookup: (StatusCode, Value),
    pub profile: (StatusCode, Value),
    pub unknown_route: (StatusCode, Value),
    pub log: RequestLog,
}

impl Default for Backend {
    fn default() -> Self {
        let unauthorized = json!({ "error": "No valid authorization header" });
        Self {
            health: (
                StatusCode::OK,
                json!({ "status": "OK", "timestamp": "2026-10-16T09:00:00.000Z" }),
            ),
            allow_origin: Some("http://localhost:3000"),
            public_rooms: (
                StatusCode::OK,
                json!([
                    { "id": "r1", "name": "Study Hall", "isPrivate": false },
                    { "id": "r2", "name": "Pair Programming", "isPrivate": false },
                ]),
            ),
            user_search: (StatusCode::OK, json!([])),
            room_lookup: (StatusCode::NOT_FOUND, json!({ "error": "Room not found" })),
            user_lookup: (StatusCode::NOT_FOUND, json!({ "error": "User not found" })),
            profile: (StatusCode::UNAUTHORIZED, unauthorized),
            unknown_route: (StatusCode::NOT_FOUND, json!({ "error": "Route not found" })),
            log: RequestLog::default(),
        }
    }
}

impl Backend {
    pub fn router(self) -> Router {
        let unauthorized = json!({ "error": "No valid authorization header" });
        let allow: Vec<(HeaderName, &'static str)> = self
            .allow_origin
            .map(|origin| vec![(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin)])
            .unwrap_or_default();

        let log = self.log;
        let reply = |status: StatusCode, body: Value| canned(log.clone(), status, body);

        let preflight_log = log.clone();
        let preflight = move |method: Method, uri: Uri, headers: HeaderMap| {
            preflight_log.push(SeenRequest {
                method,
                uri,
                headers,
                body: String::new(),
            });
            ready((StatusCode::NO_CONTENT, AppendHeaders(allow.clone()), ()))
        };

        Router::new()
            .route(
                "/api/health",
                get(reply(self.health.0, self.health.1)).options(preflight),
            )
            .route(
                "/api/rooms/public",
                get(reply(self.public_rooms.0, self.public_rooms.1)),
            )
            .route(
                "/api/rooms",
                post(reply(StatusCode::UNAUTHORIZED, unauthorized.clone())),
            )
            .route(
                "/api/rooms/join/{access_code}",
                post(reply(StatusCode::UNAUTHORIZED, unauthorized)),
            )
            .route(
                "/api/rooms/{room_id}",
                get(reply(self.room_lookup.0, self.room_lookup.1)),
            )
            .route(
                "/api/users/profile",
                get(reply(self.profile.0, self.profile.1)),
            )
            .route(
                "/api/users/search",
                get(reply(self.user_search.0, self.user_search.1)),
            )
            .route(
                "/api/users/{user_id}/public",
                get(reply(self.user_lookup.0, self.user_lookup.1)),
            )
            .fallback(reply(self.unknown_route.0, self.unknown_route.1))
    }

    pub fn start(self) -> MockService {
        MockService::start(self.router())
    }
}
