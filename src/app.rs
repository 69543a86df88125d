use axum::{middleware, Router};
use tower_http::services::ServeDir;

use crate::{
    app_state::AppState,
    middleware::{observability_middleware, session_middleware},
    modules::{
        availability::routes::availability_routes, pages::routes::page_routes,
        reservations::routes::reservation_routes,
    },
};

pub fn create_router(state: AppState) -> Router {
    let static_dir = state.env.app.static_dir.to_string();

    Router::new()
        .merge(page_routes())
        .merge(availability_routes())
        .merge(reservation_routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .layer(middleware::from_fn(observability_middleware))
        .with_state(state)
}
