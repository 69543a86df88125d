use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{availability, availability_json, book_room, choose_room, post_availability};
use crate::app_state::AppState;

pub fn availability_routes() -> Router<AppState> {
    Router::new()
        .route("/search-availability", get(availability).post(post_availability))
        .route("/search-availability-json", post(availability_json))
        .route("/choose-room/{id}", get(choose_room))
        .route("/book-room", get(book_room))
}
