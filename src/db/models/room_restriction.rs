use serde::{Deserialize, Serialize};
use time::Date;

/// Restriction id used for rows that block a room because of a reservation.
pub const RESERVATION_RESTRICTION_ID: i32 = 1;

/// A room blocked for a date range, created alongside a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRestriction {
    pub id: i32,
    pub start_date: Date,
    pub end_date: Date,
    pub room_id: i32,
    pub reservation_id: i32,
    pub restriction_id: i32,
}

impl RoomRestriction {
    pub fn for_reservation(reservation_id: i32, room_id: i32, start_date: Date, end_date: Date) -> Self {
        Self {
            id: 0,
            start_date,
            end_date,
            room_id,
            reservation_id,
            restriction_id: RESERVATION_RESTRICTION_ID,
        }
    }

    /// Half-open overlap against `[start, end)`, the same rule the SQL queries use.
    pub fn overlaps(&self, start: Date, end: Date) -> bool {
        start < self.end_date && end > self.start_date
    }
}
