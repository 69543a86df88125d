use axum::{routing::get, Router};

use super::handlers::{post_reservation, reservation, reservation_summary};
use crate::app_state::AppState;

pub fn reservation_routes() -> Router<AppState> {
    Router::new()
        .route("/make-reservation", get(reservation).post(post_reservation))
        .route("/reservation-summary", get(reservation_summary))
}
