pub mod availability;
pub mod pages;
pub mod reservations;
