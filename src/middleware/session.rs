use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::config::SessionConfig;
use crate::session::Session;

/// Attaches a [`Session`] to every request.
///
/// A request without a live session cookie gets a fresh id, which is only
/// stored and sent back once a handler writes to the session.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let config = &state.env.session;

    let session_id = match read_session_cookie(request.headers(), &config.cookie_name) {
        Some(id) if state.sessions.contains(&id) => {
            state.sessions.touch(&id);
            id
        }
        _ => Uuid::new_v4().to_string(),
    };

    request
        .extensions_mut()
        .insert(Session::new(session_id.clone(), state.sessions.clone()));

    let mut response = next.run(request).await;

    if !state.sessions.contains(&session_id) {
        return response;
    }

    match HeaderValue::from_str(&build_cookie_header(config, &session_id)) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => tracing::error!(error = %e, "Failed to build session cookie"),
    }

    response
}

fn read_session_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.to_string())
}

fn build_cookie_header(config: &SessionConfig, session_id: &str) -> String {
    let mut parts = vec![
        format!("{}={}", config.cookie_name, session_id),
        "Path=/".to_string(),
        "HttpOnly".to_string(),
        "SameSite=Lax".to_string(),
        format!("Max-Age={}", config.lifetime.as_secs()),
    ];

    if config.secure {
        parts.push("Secure".to_string());
    }

    parts.join("; ")
}
