//! # Reservation Repository
//!
//! Database operations for reservations.
//!
//! ## Write Path
//! Creating or moving a reservation is a check-then-insert sequence that
//! must not race with a concurrent booking on the same table. The service
//! layer therefore runs both steps on one transaction:
//!
//! ```text
//! BEGIN
//!   fetch_booked_for_table(tx, table_id)   ← read inside the transaction
//!   (availability engine decides)
//!   create(tx, reservation)                ← write inside the same one
//! COMMIT
//! ```
//!
//! The transaction-scoped functions here take `&mut SqliteConnection` so a
//! `sqlx::Transaction` can be threaded through (`&mut *tx`).

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use bistro_core::{Reservation, ReservationStatus};

const RESERVATION_COLUMNS: &str = "id, table_id, customer_name, customer_phone, party_size, \
     reserved_for, duration_minutes, status, notes, created_at, updated_at";

/// Repository for reservation database operations.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: SqlitePool,
}

impl ReservationRepository {
    /// Creates a new ReservationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReservationRepository { pool }
    }

    /// Lists all reservations, most recent start time first.
    pub async fn list(&self) -> DbResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations ORDER BY reserved_for DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }

    /// Gets a reservation by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Reservation>> {
        let reservation = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reservation)
    }

    /// Lists every booked reservation across all tables.
    ///
    /// Used by the table availability query; the availability engine matches
    /// reservations to tables by `table_id`.
    pub async fn list_booked(&self) -> DbResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE status = ?1"
        ))
        .bind(ReservationStatus::Booked)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }

    /// Deletes a reservation.
    ///
    /// Orders referencing it keep existing; their `reservation_id` goes NULL
    /// (`ON DELETE SET NULL`).
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting reservation");

        let result = sqlx::query("DELETE FROM reservations WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Reservation", id));
        }

        Ok(())
    }

    // =========================================================================
    // Transaction-Scoped Operations
    // =========================================================================

    /// Fetches the booked reservations of one table inside a caller-owned
    /// transaction.
    pub async fn fetch_booked_for_table(
        conn: &mut SqliteConnection,
        table_id: &str,
    ) -> DbResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE table_id = ?1 AND status = ?2"
        ))
        .bind(table_id)
        .bind(ReservationStatus::Booked)
        .fetch_all(conn)
        .await?;

        Ok(reservations)
    }

    /// Inserts a reservation inside a caller-owned transaction.
    pub async fn create(conn: &mut SqliteConnection, reservation: &Reservation) -> DbResult<()> {
        debug!(
            id = %reservation.id,
            table_id = %reservation.table_id,
            reserved_for = %reservation.reserved_for,
            "Inserting reservation"
        );

        sqlx::query(
            r#"
            INSERT INTO reservations (
                id, table_id, customer_name, customer_phone, party_size,
                reserved_for, duration_minutes, status, notes,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&reservation.id)
        .bind(&reservation.table_id)
        .bind(&reservation.customer_name)
        .bind(&reservation.customer_phone)
        .bind(reservation.party_size)
        .bind(reservation.reserved_for)
        .bind(reservation.duration_minutes)
        .bind(reservation.status)
        .bind(&reservation.notes)
        .bind(reservation.created_at)
        .bind(reservation.updated_at)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Rewrites a reservation's mutable fields inside a caller-owned
    /// transaction.
    ///
    /// `status` is deliberately absent: it is read-only through the general
    /// update path.
    pub async fn update_fields(
        conn: &mut SqliteConnection,
        reservation: &Reservation,
    ) -> DbResult<()> {
        debug!(id = %reservation.id, "Updating reservation");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE reservations SET
                table_id = ?2,
                customer_name = ?3,
                customer_phone = ?4,
                party_size = ?5,
                reserved_for = ?6,
                duration_minutes = ?7,
                notes = ?8,
                updated_at = ?9
            WHERE id = ?1
            "#,
        )
        .bind(&reservation.id)
        .bind(&reservation.table_id)
        .bind(&reservation.customer_name)
        .bind(&reservation.customer_phone)
        .bind(reservation.party_size)
        .bind(reservation.reserved_for)
        .bind(reservation.duration_minutes)
        .bind(&reservation.notes)
        .bind(now)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Reservation", &reservation.id));
        }

        Ok(())
    }
}

/// Helper to generate a new reservation ID.
pub fn generate_reservation_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::table::generate_table_id;
    use bistro_core::Table;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    async fn seeded_table(db: &Database) -> String {
        let now = Utc::now();
        let table = Table {
            id: generate_table_id(),
            number: 1,
            capacity: 4,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        db.tables().insert(&table).await.unwrap();
        table.id
    }

    fn reservation(table_id: &str, start: DateTime<Utc>) -> Reservation {
        let now = Utc::now();
        Reservation {
            id: generate_reservation_id(),
            table_id: table_id.to_string(),
            customer_name: "Ada".to_string(),
            customer_phone: String::new(),
            party_size: 2,
            reserved_for: start,
            duration_minutes: 90,
            status: ReservationStatus::Booked,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    async fn insert(db: &Database, r: &Reservation) {
        let mut tx = db.pool().begin().await.unwrap();
        ReservationRepository::create(&mut tx, r).await.unwrap();
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_list_orders_by_start_desc() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let table_id = seeded_table(&db).await;

        let early = Utc.with_ymd_and_hms(2026, 3, 1, 17, 0, 0).unwrap();
        let late = early + Duration::hours(3);
        insert(&db, &reservation(&table_id, early)).await;
        insert(&db, &reservation(&table_id, late)).await;

        let listed = db.reservations().list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].reserved_for, late);
        assert_eq!(listed[1].reserved_for, early);
    }

    #[tokio::test]
    async fn test_round_trip_preserves_fields() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let table_id = seeded_table(&db).await;

        let start = Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap();
        let r = reservation(&table_id, start);
        insert(&db, &r).await;

        let loaded = db.reservations().get_by_id(&r.id).await.unwrap().unwrap();
        assert_eq!(loaded.reserved_for, start);
        assert_eq!(loaded.duration_minutes, 90);
        assert_eq!(loaded.status, ReservationStatus::Booked);
        assert_eq!(loaded.reserved_until(), start + Duration::minutes(90));
    }

    #[tokio::test]
    async fn test_fetch_booked_filters_by_table() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let table_id = seeded_table(&db).await;

        let other = Table {
            id: generate_table_id(),
            number: 2,
            capacity: 2,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        db.tables().insert(&other).await.unwrap();

        let start = Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap();
        insert(&db, &reservation(&table_id, start)).await;
        insert(&db, &reservation(&other.id, start)).await;

        let mut tx = db.pool().begin().await.unwrap();
        let booked = ReservationRepository::fetch_booked_for_table(&mut tx, &table_id)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(booked.len(), 1);
        assert_eq!(booked[0].table_id, table_id);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db.reservations().delete("nope").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
