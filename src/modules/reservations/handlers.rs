use askama::Template;
use axum::{
    extract::State,
    http::Method,
    response::{IntoResponse, Redirect, Response},
};
use time::Date;

use crate::app_state::AppState;
use crate::db::{NewReservation, Reservation, RoomRestriction};
use crate::error::AppResult;
use crate::forms::{Form, FormValues};
use crate::helpers::{form_values, parse_date, parse_id, redirect_with_error, FormBody};
use crate::render::{HtmlTemplate, TemplateData};
use crate::session::Session;

#[derive(Template)]
#[template(path = "make-reservation.html")]
struct MakeReservationTemplate {
    data: TemplateData,
    form: Form,
    room_name: String,
}

/// Pre-fills the booking form from a draft reservation.
fn draft_form(reservation: &Reservation) -> Form {
    let mut values = FormValues::default();
    values.set("first_name", reservation.first_name.as_str());
    values.set("last_name", reservation.last_name.as_str());
    values.set("email", reservation.email.as_str());
    values.set("phone", reservation.phone.as_str());
    values.set("start_date", reservation.start_date.to_string());
    values.set("end_date", reservation.end_date.to_string());
    values.set("room_id", reservation.room_id.to_string());
    Form::new(values)
}

pub async fn reservation(State(state): State<AppState>, session: Session) -> Response {
    let Some(mut draft) = session.reservation() else {
        return HtmlTemplate(MakeReservationTemplate {
            data: TemplateData::new(&state.env.app.name, &session),
            form: Form::default(),
            room_name: String::new(),
        })
        .into_response();
    };

    draft.room = match state.repo.get_room_by_id(draft.room_id).await {
        Ok(room) => room,
        Err(e) => {
            tracing::error!(error = %e, room_id = draft.room_id, "Could not load room for draft");
            return redirect_with_error(&session, &Method::GET, "/", "Can't find room!");
        }
    };
    session.put_reservation(draft.clone());

    HtmlTemplate(MakeReservationTemplate {
        data: TemplateData::new(&state.env.app.name, &session),
        form: draft_form(&draft),
        room_name: draft.room.room_name,
    })
    .into_response()
}

fn parse_stay(values: &FormValues) -> AppResult<(Date, Date, i32)> {
    let start = parse_date("start_date", values.get("start_date"))?;
    let end = parse_date("end_date", values.get("end_date"))?;
    let room_id = parse_id("room_id", values.get("room_id"))?;
    Ok((start, end, room_id))
}

/// Validates and stores a reservation together with the restriction that blocks its room.
///
/// The two inserts are not wrapped in a transaction: a failed restriction
/// insert leaves the reservation row behind.
pub async fn post_reservation(
    State(state): State<AppState>,
    session: Session,
    body: FormBody,
) -> Response {
    let values = form_values(body);

    let (start, end, room_id) = match parse_stay(&values) {
        Ok(stay) => stay,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected reservation submission");
            return redirect_with_error(&session, &Method::POST, "/", "Can't parse reservation details");
        }
    };

    let mut reservation: Reservation = NewReservation {
        first_name: values.get("first_name").to_string(),
        last_name: values.get("last_name").to_string(),
        email: values.get("email").to_string(),
        phone: values.get("phone").to_string(),
        room_id,
        start_date: start,
        end_date: end,
    }
    .into();
    if let Some(draft) = session.reservation().filter(|d| d.room_id == room_id) {
        reservation.room = draft.room;
    }

    let mut form = Form::new(values);
    form.required(&["first_name", "last_name", "email"]);
    form.min_length("first_name", 3);
    form.is_email("email");

    if !form.valid() {
        return HtmlTemplate(MakeReservationTemplate {
            data: TemplateData::new(&state.env.app.name, &session),
            form,
            room_name: reservation.room.room_name,
        })
        .into_response();
    }

    reservation.id = match state.repo.insert_reservation(&reservation).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!(error = %e, "Could not insert reservation");
            return redirect_with_error(
                &session,
                &Method::POST,
                "/",
                "Can't insert reservation into database!",
            );
        }
    };

    let restriction = RoomRestriction::for_reservation(reservation.id, room_id, start, end);
    if let Err(e) = state.repo.insert_room_restriction(&restriction).await {
        tracing::error!(
            error = %e,
            reservation.id = reservation.id,
            "Could not insert room restriction; reservation is left without one"
        );
        return redirect_with_error(&session, &Method::POST, "/", "Can't insert room restriction!");
    }

    tracing::info!(reservation.id = reservation.id, room_id, %start, %end, "Reservation created");
    session.put_reservation(reservation);
    Redirect::to("/reservation-summary").into_response()
}

#[derive(Template)]
#[template(path = "reservation-summary.html")]
struct ReservationSummaryTemplate {
    data: TemplateData,
    reservation: Reservation,
}

/// Shows the stored reservation once, then forgets it.
pub async fn reservation_summary(State(state): State<AppState>, session: Session) -> Response {
    let Some(reservation) = session.take_reservation() else {
        tracing::warn!("No reservation in session for summary");
        return redirect_with_error(&session, &Method::GET, "/", "Can't get reservation from session");
    };

    HtmlTemplate(ReservationSummaryTemplate {
        data: TemplateData::new(&state.env.app.name, &session),
        reservation,
    })
    .into_response()
}
