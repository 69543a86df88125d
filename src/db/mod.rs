mod error;
pub mod models;
pub mod repositories;

use anyhow::{Context, Result};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::postgres::{PgPool, PgPoolOptions};
use time::Date;

use crate::config::DatabaseConfig;

pub use error::{DatabaseError, DbResult};
pub use models::*;

/// Persistence gateway consumed by the handlers.
#[async_trait]
pub trait DatabaseRepo: Send + Sync {
    /// Health probe.
    async fn all_users(&self) -> bool;

    /// Inserts a reservation and returns its generated id.
    async fn insert_reservation(&self, reservation: &Reservation) -> DbResult<i32>;

    async fn insert_room_restriction(&self, restriction: &RoomRestriction) -> DbResult<()>;

    /// True when `room_id` has no restriction overlapping `[start, end)`.
    async fn search_availability_by_dates_by_room_id(
        &self,
        start: Date,
        end: Date,
        room_id: i32,
    ) -> DbResult<bool>;

    /// Every room free for the whole of `[start, end)`.
    async fn search_availability_for_all_rooms(&self, start: Date, end: Date) -> DbResult<Vec<Room>>;

    async fn get_room_by_id(&self, id: i32) -> DbResult<Room>;
}

/// Initialize the database connection pool and apply pending migrations
pub async fn init_pool(config: &DatabaseConfig, url: &secrecy::SecretString) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections.unwrap_or(10))
        .min_connections(config.min_connections.unwrap_or(1))
        .connect(url.expose_secret())
        .await
        .context("Failed to connect to the database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(DatabaseError::from)
        .context("Failed to run database migrations")?;

    Ok(pool)
}
