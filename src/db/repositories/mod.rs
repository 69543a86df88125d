mod memory_repo;
mod postgres_repo;

pub use memory_repo::{Faults, MemoryRepo};
pub use postgres_repo::PostgresRepo;
