use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::Method,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::db::{Reservation, Room};
use crate::helpers::{form_values, parse_date, parse_id, redirect_with_error, FormBody};
use crate::render::{HtmlTemplate, TemplateData};
use crate::session::Session;

#[derive(Template)]
#[template(path = "search-availability.html")]
struct SearchAvailabilityTemplate {
    data: TemplateData,
}

pub async fn availability(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    HtmlTemplate(SearchAvailabilityTemplate {
        data: TemplateData::new(&state.env.app.name, &session),
    })
}

#[derive(Template)]
#[template(path = "choose-room.html")]
struct ChooseRoomTemplate {
    data: TemplateData,
    rooms: Vec<Room>,
}

/// Searches every room for the posted dates. A match stores a draft
/// reservation and lists the free rooms.
pub async fn post_availability(
    State(state): State<AppState>,
    session: Session,
    body: FormBody,
) -> Response {
    let values = form_values(body);

    let dates = parse_date("start", values.get("start"))
        .and_then(|start| Ok((start, parse_date("end", values.get("end"))?)));
    let (start, end) = match dates {
        Ok(dates) => dates,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected availability search");
            return redirect_with_error(&session, &Method::POST, "/", "Can't parse dates!");
        }
    };

    let rooms = match state.repo.search_availability_for_all_rooms(start, end).await {
        Ok(rooms) => rooms,
        Err(e) => {
            tracing::error!(error = %e, "Availability search failed");
            return redirect_with_error(
                &session,
                &Method::POST,
                "/",
                "Can't get availability for rooms",
            );
        }
    };

    if rooms.is_empty() {
        tracing::debug!(%start, %end, "No rooms available");
        return redirect_with_error(&session, &Method::POST, "/search-availability", "No availability");
    }

    session.put_reservation(Reservation::draft(start, end));

    HtmlTemplate(ChooseRoomTemplate {
        data: TemplateData::new(&state.env.app.name, &session),
        rooms,
    })
    .into_response()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub ok: bool,
    pub message: String,
    pub room_id: String,
    pub start_date: String,
    pub end_date: String,
}

/// Availability of a single room, answered as JSON with status 200 even on failure.
pub async fn availability_json(State(state): State<AppState>, body: FormBody) -> Json<AvailabilityResponse> {
    let values = form_values(body);
    let mut response = AvailabilityResponse {
        ok: false,
        message: String::new(),
        room_id: values.get("room_id").to_string(),
        start_date: values.get("start").to_string(),
        end_date: values.get("end").to_string(),
    };

    let parsed = parse_date("start", values.get("start")).and_then(|start| {
        let end = parse_date("end", values.get("end"))?;
        let room_id = parse_id("room_id", values.get("room_id"))?;
        Ok((start, end, room_id))
    });
    let (start, end, room_id) = match parsed {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected room availability request");
            response.message = "internal server error".to_string();
            return Json(response);
        }
    };

    match state
        .repo
        .search_availability_by_dates_by_room_id(start, end, room_id)
        .await
    {
        Ok(available) => response.ok = available,
        Err(e) => {
            tracing::error!(error = %e, room_id, "Room availability query failed");
            response.message = "error querying database".to_string();
        }
    }

    Json(response)
}

/// Puts the chosen room on the session's draft and moves on to the booking form.
pub async fn choose_room(session: Session, Path(id): Path<String>) -> Response {
    let room_id = match parse_id("id", &id) {
        Ok(room_id) => room_id,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected room choice");
            return redirect_with_error(&session, &Method::GET, "/", "Invalid room id");
        }
    };

    let chosen = session.update(|state| match state.reservation.as_mut() {
        Some(draft) => {
            draft.room_id = room_id;
            true
        }
        None => false,
    });
    if !chosen {
        return redirect_with_error(&session, &Method::GET, "/", "Can't get reservation from session");
    }

    Redirect::to("/make-reservation").into_response()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BookRoomParams {
    pub id: String,
    pub s: String,
    pub e: String,
}

/// Starts a draft from a room page link: `/book-room?id=1&s=2050-01-01&e=2050-01-02`.
pub async fn book_room(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<BookRoomParams>,
) -> Response {
    let parsed = parse_id("id", &params.id).and_then(|room_id| {
        let start = parse_date("s", &params.s)?;
        let end = parse_date("e", &params.e)?;
        Ok((room_id, start, end))
    });
    let (room_id, start, end) = match parsed {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected book-room link");
            return redirect_with_error(&session, &Method::GET, "/", "Can't parse booking details");
        }
    };

    let room = match state.repo.get_room_by_id(room_id).await {
        Ok(room) => room,
        Err(e) => {
            tracing::error!(error = %e, room_id, "Could not load room");
            return redirect_with_error(&session, &Method::GET, "/", "Can't get room from database");
        }
    };

    let mut draft = Reservation::draft(start, end);
    draft.room_id = room_id;
    draft.room = room;
    session.put_reservation(draft);

    Redirect::to("/make-reservation").into_response()
}
