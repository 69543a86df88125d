use std::sync::RwLock;

use async_trait::async_trait;
use time::Date;

use crate::db::{DatabaseError, DatabaseRepo, DbResult, Reservation, Room, RoomRestriction};

/// Failure switches, each making the matching gateway call return an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Faults {
    pub insert_reservation: bool,
    pub insert_restriction: bool,
    pub search: bool,
}

#[derive(Debug, Default)]
struct MemoryData {
    rooms: Vec<Room>,
    reservations: Vec<Reservation>,
    restrictions: Vec<RoomRestriction>,
}

/// In-process gateway used when no database is configured, and by the tests.
#[derive(Debug, Default)]
pub struct MemoryRepo {
    data: RwLock<MemoryData>,
    faults: Faults,
}

impl MemoryRepo {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self {
            data: RwLock::new(MemoryData {
                rooms,
                ..MemoryData::default()
            }),
            faults: Faults::default(),
        }
    }

    /// The same two rooms the migrations seed.
    pub fn seeded() -> Self {
        Self::new(vec![
            Room::new(1, "General's Quarters"),
            Room::new(2, "Major's Suite"),
        ])
    }

    pub fn with_faults(mut self, faults: Faults) -> Self {
        self.faults = faults;
        self
    }

    pub fn reservations(&self) -> Vec<Reservation> {
        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        data.reservations.clone()
    }

    pub fn restrictions(&self) -> Vec<RoomRestriction> {
        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        data.restrictions.clone()
    }

    /// Blocks a room directly, without a reservation behind it.
    pub fn block_room(&self, room_id: i32, start: Date, end: Date) {
        let mut data = self.data.write().unwrap_or_else(|e| e.into_inner());
        let id = data.restrictions.len() as i32 + 1;
        data.restrictions.push(RoomRestriction {
            id,
            start_date: start,
            end_date: end,
            room_id,
            reservation_id: 0,
            restriction_id: 2,
        });
    }

    fn room_is_free(data: &MemoryData, room_id: i32, start: Date, end: Date) -> bool {
        !data
            .restrictions
            .iter()
            .any(|r| r.room_id == room_id && r.overlaps(start, end))
    }
}

#[async_trait]
impl DatabaseRepo for MemoryRepo {
    async fn all_users(&self) -> bool {
        true
    }

    async fn insert_reservation(&self, reservation: &Reservation) -> DbResult<i32> {
        if self.faults.insert_reservation {
            return Err(DatabaseError::Unavailable("reservation insert rejected".into()));
        }

        let mut data = self.data.write().unwrap_or_else(|e| e.into_inner());
        let id = data.reservations.len() as i32 + 1;
        data.reservations.push(Reservation {
            id,
            ..reservation.clone()
        });
        Ok(id)
    }

    async fn insert_room_restriction(&self, restriction: &RoomRestriction) -> DbResult<()> {
        if self.faults.insert_restriction {
            return Err(DatabaseError::Unavailable("room restriction insert rejected".into()));
        }

        let mut data = self.data.write().unwrap_or_else(|e| e.into_inner());
        let id = data.restrictions.len() as i32 + 1;
        data.restrictions.push(RoomRestriction {
            id,
            ..restriction.clone()
        });
        Ok(())
    }

    async fn search_availability_by_dates_by_room_id(
        &self,
        start: Date,
        end: Date,
        room_id: i32,
    ) -> DbResult<bool> {
        if self.faults.search {
            return Err(DatabaseError::Unavailable("availability search failed".into()));
        }

        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        Ok(Self::room_is_free(&data, room_id, start, end))
    }

    async fn search_availability_for_all_rooms(&self, start: Date, end: Date) -> DbResult<Vec<Room>> {
        if self.faults.search {
            return Err(DatabaseError::Unavailable("availability search failed".into()));
        }

        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        Ok(data
            .rooms
            .iter()
            .filter(|room| Self::room_is_free(&data, room.id, start, end))
            .cloned()
            .collect())
    }

    async fn get_room_by_id(&self, id: i32) -> DbResult<Room> {
        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        data.rooms
            .iter()
            .find(|room| room.id == id)
            .cloned()
            .ok_or(DatabaseError::NotFound)
    }
}
