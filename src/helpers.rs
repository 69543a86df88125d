use axum::{
    extract::rejection::FormRejection,
    http::Method,
    response::{IntoResponse, Redirect, Response},
};
use time::{macros::format_description, Date};

use crate::error::{AppError, AppResult};
use crate::forms::FormValues;
use crate::session::{FlashKind, Session};

/// A urlencoded request body, kept even when it fails to extract.
pub type FormBody = Result<axum::Form<Vec<(String, String)>>, FormRejection>;

/// An unreadable body is treated as an empty submission.
pub fn form_values(body: FormBody) -> FormValues {
    match body {
        Ok(axum::Form(pairs)) => FormValues::from_pairs(pairs),
        Err(e) => {
            tracing::warn!(error = %e, "Could not read submitted form");
            FormValues::default()
        }
    }
}

/// Parses a `YYYY-MM-DD` form value.
pub fn parse_date(field: &str, value: &str) -> AppResult<Date> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|e| AppError::BadRequest(format!("{field}: cannot parse {value:?} as a date: {e}")))
}

pub fn parse_id(field: &str, value: &str) -> AppResult<i32> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|e| AppError::BadRequest(format!("{field}: cannot parse {value:?} as an id: {e}")))
}

/// Flashes `message` as an error and redirects to `to`.
///
/// POST requests get `303 See Other` so the browser follows with a GET;
/// everything else gets `307 Temporary Redirect`.
pub fn redirect_with_error(session: &Session, method: &Method, to: &str, message: &str) -> Response {
    session.flash(FlashKind::Error, message);
    if *method == Method::POST {
        Redirect::to(to).into_response()
    } else {
        Redirect::temporary(to).into_response()
    }
}
