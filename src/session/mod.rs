mod store;

use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};

use crate::db::Reservation;
use crate::error::AppError;

pub use store::SessionStore;

/// Everything the site keeps per visitor between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub reservation: Option<Reservation>,
    pub remote_ip: Option<String>,
    pub flash: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Flash,
    Warning,
    Error,
}

/// One-shot messages, shown on the next rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlashMessages {
    pub flash: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
}

/// Handle to the current visitor's session, placed in request extensions by
/// [`crate::middleware::session_middleware`].
#[derive(Clone)]
pub struct Session {
    id: String,
    store: Arc<SessionStore>,
}

impl Session {
    pub fn new(id: String, store: Arc<SessionStore>) -> Self {
        Self { id, store }
    }

    pub fn state(&self) -> SessionState {
        self.store.load(&self.id)
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        self.store.update(&self.id, f)
    }

    pub fn reservation(&self) -> Option<Reservation> {
        self.state().reservation
    }

    pub fn put_reservation(&self, reservation: Reservation) {
        self.update(|s| s.reservation = Some(reservation));
    }

    pub fn take_reservation(&self) -> Option<Reservation> {
        self.update(|s| s.reservation.take())
    }

    pub fn remote_ip(&self) -> Option<String> {
        self.state().remote_ip
    }

    pub fn put_remote_ip(&self, remote_ip: String) {
        self.update(|s| s.remote_ip = Some(remote_ip));
    }

    pub fn flash(&self, kind: FlashKind, message: impl Into<String>) {
        let message = Some(message.into());
        self.update(|s| match kind {
            FlashKind::Flash => s.flash = message,
            FlashKind::Warning => s.warning = message,
            FlashKind::Error => s.error = message,
        });
    }

    pub fn take_messages(&self) -> FlashMessages {
        self.update(|s| FlashMessages {
            flash: s.flash.take(),
            warning: s.warning.take(),
            error: s.error.take(),
        })
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Session("session layer is not installed".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use time::macros::date;

    fn session() -> Session {
        Session::new(
            "test".into(),
            Arc::new(SessionStore::new(Duration::from_secs(60))),
        )
    }

    #[test]
    fn messages_are_shown_once() {
        let session = session();
        session.flash(FlashKind::Error, "No availability");
        session.flash(FlashKind::Flash, "Saved");

        let first = session.take_messages();
        assert_eq!(first.error.as_deref(), Some("No availability"));
        assert_eq!(first.flash.as_deref(), Some("Saved"));
        assert_eq!(session.take_messages(), FlashMessages::default());
    }

    #[test]
    fn take_reservation_clears_it() {
        let session = session();
        session.put_reservation(Reservation::draft(date!(2050 - 01 - 01), date!(2050 - 01 - 02)));

        assert!(session.take_reservation().is_some());
        assert!(session.reservation().is_none());
    }
}
