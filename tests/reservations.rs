mod common;

use axum::http::StatusCode;
use bookings::db::repositories::{Faults, MemoryRepo};
use common::{guest_with, TestApp, GUEST};

#[tokio::test]
async fn reservation_is_stored_and_summarised_once() {
    let mut app = TestApp::new();

    let res = app.post_form("/make-reservation", GUEST).await;
    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location.as_deref(), Some("/reservation-summary"));

    let summary = app.get("/reservation-summary").await;
    assert_eq!(summary.status, StatusCode::OK);
    for text in ["John", "Smith", "2050-01-01", "2050-01-02", "john@example.com"] {
        assert!(summary.body.contains(text), "summary is missing {text}");
    }

    let again = app.get("/reservation-summary").await;
    assert_eq!(again.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(again.location.as_deref(), Some("/"));

    let reservations = app.repo.reservations();
    assert_eq!(reservations.len(), 1);
    assert_eq!(reservations[0].first_name, "John");

    let restrictions = app.repo.restrictions();
    assert_eq!(restrictions.len(), 1);
    assert_eq!(restrictions[0].reservation_id, reservations[0].id);
    assert_eq!(restrictions[0].restriction_id, 1);
    assert_eq!(restrictions[0].room_id, 1);
}

#[tokio::test]
async fn short_first_name_re_renders_form() {
    let mut app = TestApp::new();

    let res = app
        .post_form("/make-reservation", &guest_with(&[("first_name", "Jo")]))
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("This field must be at least 3 characters long"));
    assert!(res.body.contains("john@example.com"));
    assert!(res.body.contains("555-0100"));
    assert!(app.repo.reservations().is_empty());
}

#[tokio::test]
async fn blank_and_invalid_fields_are_reported() {
    let mut app = TestApp::new();

    let res = app
        .post_form(
            "/make-reservation",
            &guest_with(&[("last_name", "  "), ("email", "not-an-email")]),
        )
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("This field cannot be blank"));
    assert!(res.body.contains("Invalid email address"));
}

#[tokio::test]
async fn unparsable_submission_redirects_home() {
    let mut app = TestApp::new();

    for overrides in [
        &[("start_date", "invalid")][..],
        &[("end_date", "2050-13-01")][..],
        &[("room_id", "one")][..],
    ] {
        let res = app.post_form("/make-reservation", &guest_with(overrides)).await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);
        assert_eq!(res.location.as_deref(), Some("/"));
    }

    let home = app.get("/").await;
    assert!(home.body.contains("parse reservation details"));
    assert!(app.repo.reservations().is_empty());
}

#[tokio::test]
async fn empty_body_redirects_home() {
    let mut app = TestApp::new();
    let res = app.post_form("/make-reservation", &[]).await;

    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location.as_deref(), Some("/"));
}

#[tokio::test]
async fn reservation_insert_failure_redirects_home() {
    let mut app = TestApp::with_repo(MemoryRepo::seeded().with_faults(Faults {
        insert_reservation: true,
        ..Faults::default()
    }));

    let res = app.post_form("/make-reservation", GUEST).await;
    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location.as_deref(), Some("/"));

    let home = app.get("/").await;
    assert!(home.body.contains("insert reservation into database"));
    assert_eq!(
        app.get("/reservation-summary").await.status,
        StatusCode::TEMPORARY_REDIRECT
    );
}

#[tokio::test]
async fn restriction_failure_leaves_reservation_behind() {
    let mut app = TestApp::with_repo(MemoryRepo::seeded().with_faults(Faults {
        insert_restriction: true,
        ..Faults::default()
    }));

    let res = app.post_form("/make-reservation", GUEST).await;
    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location.as_deref(), Some("/"));

    assert_eq!(app.repo.reservations().len(), 1);
    assert!(app.repo.restrictions().is_empty());

    let home = app.get("/").await;
    assert!(home.body.contains("insert room restriction"));
}

#[tokio::test]
async fn empty_form_without_draft() {
    let mut app = TestApp::new();
    let res = app.get("/make-reservation").await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("name=\"first_name\" value=\"\""));
}

#[tokio::test]
async fn book_room_prefills_form() {
    let mut app = TestApp::new();

    let res = app.get("/book-room?id=2&s=2050-03-01&e=2050-03-04").await;
    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location.as_deref(), Some("/make-reservation"));

    let form = app.get("/make-reservation").await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains("Suite"));
    assert!(form.body.contains("value=\"2050-03-01\""));
    assert!(form.body.contains("value=\"2050-03-04\""));
    assert!(form.body.contains("name=\"room_id\" value=\"2\""));
}

#[tokio::test]
async fn book_room_rejects_bad_links() {
    let mut app = TestApp::new();

    for uri in [
        "/book-room?id=9&s=2050-03-01&e=2050-03-04",
        "/book-room?id=x&s=2050-03-01&e=2050-03-04",
        "/book-room?id=1&s=tomorrow&e=2050-03-04",
        "/book-room",
    ] {
        let res = app.get(uri).await;
        assert_eq!(res.status, StatusCode::TEMPORARY_REDIRECT, "{uri}");
        assert_eq!(res.location.as_deref(), Some("/"), "{uri}");
    }
}

#[tokio::test]
async fn draft_room_name_is_carried_into_summary() {
    let mut app = TestApp::new();

    app.get("/book-room?id=2&s=2050-01-01&e=2050-01-02").await;
    app.get("/make-reservation").await;

    let res = app
        .post_form("/make-reservation", &guest_with(&[("room_id", "2")]))
        .await;
    assert_eq!(res.status, StatusCode::SEE_OTHER);

    let summary = app.get("/reservation-summary").await;
    assert!(summary.body.contains("Major"));
    assert!(summary.body.contains("Suite"));
}
