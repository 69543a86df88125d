use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use super::Room;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub room_id: i32,
    pub start_date: Date,
    pub end_date: Date,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub room: Room,
}

impl Reservation {
    /// A draft carrying only the stay dates, as stored after an availability search.
    pub fn draft(start_date: Date, end_date: Date) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: 0,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            room_id: 0,
            start_date,
            end_date,
            created_at: now,
            updated_at: now,
            room: Room::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewReservation {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub room_id: i32,
    pub start_date: Date,
    pub end_date: Date,
}

impl From<NewReservation> for Reservation {
    fn from(value: NewReservation) -> Self {
        let NewReservation {
            first_name,
            last_name,
            email,
            phone,
            room_id,
            start_date,
            end_date,
        } = value;
        Self {
            first_name,
            last_name,
            email,
            phone,
            room_id,
            ..Reservation::draft(start_date, end_date)
        }
    }
}
