mod reservation;
mod room;
mod room_restriction;

pub use reservation::*;
pub use room::*;
pub use room_restriction::*;
