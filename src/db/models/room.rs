use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Room {
    pub id: i32,
    pub room_name: String,
}

impl Room {
    pub fn new(id: i32, room_name: impl Into<String>) -> Self {
        Self {
            id,
            room_name: room_name.into(),
        }
    }
}
