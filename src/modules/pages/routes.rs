use axum::{routing::get, Router};

use super::handlers::{about, contact, generals, health_check, home, majors};
use crate::app_state::AppState;

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/generals-quarters", get(generals))
        .route("/majors-suite", get(majors))
        .route("/contact", get(contact))
        .route("/health", get(health_check))
}
