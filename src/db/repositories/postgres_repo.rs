use async_trait::async_trait;
use sqlx::PgPool;
use time::{Date, OffsetDateTime};

use crate::db::{DatabaseError, DatabaseRepo, DbResult, Reservation, Room, RoomRestriction};

pub struct PostgresRepo {
    pool: PgPool,
}

impl PostgresRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseRepo for PostgresRepo {
    async fn all_users(&self) -> bool {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                false
            }
        }
    }

    async fn insert_reservation(&self, reservation: &Reservation) -> DbResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO reservations
                (first_name, last_name, email, phone, start_date, end_date, room_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(&reservation.first_name)
        .bind(&reservation.last_name)
        .bind(&reservation.email)
        .bind(&reservation.phone)
        .bind(reservation.start_date)
        .bind(reservation.end_date)
        .bind(reservation.room_id)
        .bind(reservation.created_at)
        .bind(reservation.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn insert_room_restriction(&self, restriction: &RoomRestriction) -> DbResult<()> {
        let now = OffsetDateTime::now_utc();
        sqlx::query(
            r#"
            INSERT INTO room_restrictions
                (start_date, end_date, room_id, reservation_id, restriction_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(restriction.start_date)
        .bind(restriction.end_date)
        .bind(restriction.room_id)
        .bind(restriction.reservation_id)
        .bind(restriction.restriction_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn search_availability_by_dates_by_room_id(
        &self,
        start: Date,
        end: Date,
        room_id: i32,
    ) -> DbResult<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(id)
            FROM room_restrictions
            WHERE room_id = $1
              AND $2 < end_date
              AND $3 > start_date
            "#,
        )
        .bind(room_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(count == 0)
    }

    async fn search_availability_for_all_rooms(&self, start: Date, end: Date) -> DbResult<Vec<Room>> {
        let rooms = sqlx::query_as::<_, Room>(
            r#"
            SELECT r.id, r.room_name
            FROM rooms r
            WHERE r.id NOT IN (
                SELECT rr.room_id
                FROM room_restrictions rr
                WHERE $1 < rr.end_date
                  AND $2 > rr.start_date
            )
            ORDER BY r.id
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    async fn get_room_by_id(&self, id: i32) -> DbResult<Room> {
        sqlx::query_as::<_, Room>("SELECT id, room_name FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DatabaseError::NotFound)
    }
}
