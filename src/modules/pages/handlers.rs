use std::net::SocketAddr;

use askama::Template;
use axum::{
    extract::{rejection::ExtensionRejection, ConnectInfo, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::app_state::AppState;
use crate::render::{HtmlTemplate, TemplateData};
use crate::session::Session;

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    data: TemplateData,
}

/// Remembers the visitor's address so the about page can greet them.
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    connect_info: Result<ConnectInfo<SocketAddr>, ExtensionRejection>,
) -> impl IntoResponse {
    if let Ok(ConnectInfo(addr)) = connect_info {
        session.put_remote_ip(addr.ip().to_string());
    }
    HtmlTemplate(HomeTemplate {
        data: TemplateData::new(&state.env.app.name, &session),
    })
}

#[derive(Template)]
#[template(path = "about.html")]
struct AboutTemplate {
    data: TemplateData,
    greeting: String,
    remote_ip: String,
}

pub async fn about(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    HtmlTemplate(AboutTemplate {
        data: TemplateData::new(&state.env.app.name, &session),
        greeting: "Hello, again.".to_string(),
        remote_ip: session.remote_ip().unwrap_or_default(),
    })
}

#[derive(Template)]
#[template(path = "generals.html")]
struct GeneralsTemplate {
    data: TemplateData,
}

pub async fn generals(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    HtmlTemplate(GeneralsTemplate {
        data: TemplateData::new(&state.env.app.name, &session),
    })
}

#[derive(Template)]
#[template(path = "majors.html")]
struct MajorsTemplate {
    data: TemplateData,
}

pub async fn majors(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    HtmlTemplate(MajorsTemplate {
        data: TemplateData::new(&state.env.app.name, &session),
    })
}

#[derive(Template)]
#[template(path = "contact.html")]
struct ContactTemplate {
    data: TemplateData,
}

pub async fn contact(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    HtmlTemplate(ContactTemplate {
        data: TemplateData::new(&state.env.app.name, &session),
    })
}

pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let db_status = if state.repo.all_users().await {
        "healthy"
    } else {
        "unhealthy"
    };

    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    Json(json!({
        "status": "ok",
        "timestamp": timestamp,
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "database": db_status,
        },
        "sessions": state.sessions.count(),
    }))
}
