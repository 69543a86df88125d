#![allow(dead_code)]

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::connect_info::MockConnectInfo,
    http::{header, Request, StatusCode},
    Router,
};
use bookings::{
    app::create_router,
    app_state::AppState,
    config::{AppConfig, Config, DatabaseConfig, Environment, ServerConfig, SessionConfig},
    db::repositories::MemoryRepo,
    session::SessionStore,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: Ipv4Addr::LOCALHOST.into(),
            port: 0,
        },
        database: DatabaseConfig {
            url: None,
            max_connections: None,
            min_connections: None,
        },
        session: SessionConfig {
            lifetime: Duration::from_secs(60 * 60),
            ..SessionConfig::default()
        },
        app: AppConfig {
            name: "Bookings".to_string(),
            environment: Environment::Development,
            static_dir: "static".to_string(),
        },
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub set_cookie: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }
}

/// A router backed by an in-memory repository, acting as one browser:
/// the session cookie from each response is sent with the next request.
pub struct TestApp {
    router: Router,
    pub repo: Arc<MemoryRepo>,
    pub sessions: Arc<SessionStore>,
    cookie: Option<String>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_repo(MemoryRepo::seeded())
    }

    pub fn with_repo(repo: MemoryRepo) -> Self {
        let repo = Arc::new(repo);
        let state = AppState::new(repo.clone(), test_config());
        let sessions = state.sessions.clone();
        Self {
            router: create_router(state),
            repo,
            sessions,
            cookie: None,
        }
    }

    /// Requests appear to come from `addr`, as when served with connect info.
    pub fn with_remote_addr(mut self, addr: SocketAddr) -> Self {
        self.router = self.router.layer(MockConnectInfo(addr));
        self
    }

    /// Stops sending the session cookie, like a client that ignores cookies.
    pub fn forget_cookie(&mut self) {
        self.cookie = None;
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(serde_urlencoded::to_string(fields).unwrap()))
            .unwrap();
        self.send(request).await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let header_str = |name: header::HeaderName| {
            response
                .headers()
                .get(name)
                .map(|v| v.to_str().unwrap().to_string())
        };
        let status = response.status();
        let location = header_str(header::LOCATION);
        let set_cookie = header_str(header::SET_COOKIE);

        if let Some(cookie) = &set_cookie {
            self.cookie = cookie.split(';').next().map(str::to_string);
        }

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            location,
            set_cookie,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

pub const GUEST: &[(&str, &str)] = &[
    ("start_date", "2050-01-01"),
    ("end_date", "2050-01-02"),
    ("first_name", "John"),
    ("last_name", "Smith"),
    ("email", "john@example.com"),
    ("phone", "555-0100"),
    ("room_id", "1"),
];

/// `GUEST` with some fields replaced.
pub fn guest_with(overrides: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
    GUEST
        .iter()
        .map(|(k, v)| {
            let value = overrides
                .iter()
                .find(|(ok, _)| ok == k)
                .map(|(_, ov)| *ov)
                .unwrap_or(*v);
            (*k, value)
        })
        .collect()
}
