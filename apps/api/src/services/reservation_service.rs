//! # Reservation Service
//!
//! Validates and persists reservations using the availability engine.
//!
//! ## Race Window
//! The overlap check and the insert must not be separated by a concurrent
//! booking on the same table, so both run on one database transaction:
//!
//! ```text
//! BEGIN
//!   read booked reservations of the table
//!   window_is_free?  ── no ──► error, rollback
//!   insert reservation
//! COMMIT
//! ```

use chrono::{DateTime, Utc};
use tracing::info;

use bistro_core::{
    availability::{filter_available, window_is_free, TimeWindow},
    validation::{validate_duration_minutes, validate_name, validate_party_size},
    CoreError, Reservation, ReservationStatus, Table,
};
use bistro_db::repository::reservation::{generate_reservation_id, ReservationRepository};
use bistro_db::{Database, DbError};

use crate::error::ApiResult;

/// Input for creating a reservation. Status is not accepted: new
/// reservations are always `booked`.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub table_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub party_size: i64,
    pub reserved_for: DateTime<Utc>,
    pub duration_minutes: i64,
    pub notes: String,
}

/// Partial update for a reservation. Absent fields keep their stored
/// values; `status` is read-only through this path.
#[derive(Debug, Clone, Default)]
pub struct ReservationPatch {
    pub table_id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub party_size: Option<i64>,
    pub reserved_for: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
}

/// Service for reservation workflows.
#[derive(Clone)]
pub struct ReservationService {
    db: Database,
}

impl ReservationService {
    pub fn new(db: Database) -> Self {
        ReservationService { db }
    }

    /// Lists all reservations, most recent start first.
    pub async fn list(&self) -> ApiResult<Vec<Reservation>> {
        Ok(self.db.reservations().list().await?)
    }

    /// Gets one reservation.
    pub async fn get(&self, id: &str) -> ApiResult<Reservation> {
        let reservation = self
            .db
            .reservations()
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::ReservationNotFound(id.to_string()))?;
        Ok(reservation)
    }

    /// Creates a reservation with status `booked`.
    ///
    /// ## Failure Modes
    /// - table missing → not found
    /// - party larger than the table → capacity error
    /// - window overlaps a booked reservation → conflict
    pub async fn create(&self, input: NewReservation) -> ApiResult<Reservation> {
        let customer_name = validate_name("customer_name", &input.customer_name)?;
        validate_party_size(input.party_size)?;
        validate_duration_minutes(input.duration_minutes)?;

        let table = self.resolve_table(&input.table_id).await?;
        check_capacity(&table, input.party_size)?;

        let window =
            TimeWindow::new(input.reserved_for, input.duration_minutes).map_err(CoreError::from)?;

        let now = Utc::now();
        let reservation = Reservation {
            id: generate_reservation_id(),
            table_id: table.id.clone(),
            customer_name,
            customer_phone: input.customer_phone.trim().to_string(),
            party_size: input.party_size,
            reserved_for: input.reserved_for,
            duration_minutes: input.duration_minutes,
            status: ReservationStatus::Booked,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        };

        // Conflict check and insert share one transaction; a concurrent
        // booking on the same table serializes behind this write.
        let mut tx = self.db.pool().begin().await.map_err(DbError::from)?;

        let booked = ReservationRepository::fetch_booked_for_table(&mut *tx, &table.id).await?;
        if !window_is_free(&window, &booked, None) {
            return Err(CoreError::WindowConflict {
                table_number: table.number,
            }
            .into());
        }

        ReservationRepository::create(&mut *tx, &reservation).await?;
        tx.commit().await.map_err(DbError::from)?;

        info!(
            id = %reservation.id,
            table = %table.number,
            reserved_for = %reservation.reserved_for,
            "Reservation created"
        );

        Ok(reservation)
    }

    /// Updates a reservation, excluding its own window from the conflict
    /// set.
    pub async fn update(&self, id: &str, patch: ReservationPatch) -> ApiResult<Reservation> {
        let mut reservation = self.get(id).await?;

        // Merge: absent fields keep their stored values
        if let Some(table_id) = patch.table_id {
            reservation.table_id = table_id;
        }
        if let Some(customer_name) = patch.customer_name {
            reservation.customer_name = customer_name;
        }
        if let Some(customer_phone) = patch.customer_phone {
            reservation.customer_phone = customer_phone.trim().to_string();
        }
        if let Some(party_size) = patch.party_size {
            reservation.party_size = party_size;
        }
        if let Some(reserved_for) = patch.reserved_for {
            reservation.reserved_for = reserved_for;
        }
        if let Some(duration_minutes) = patch.duration_minutes {
            reservation.duration_minutes = duration_minutes;
        }
        if let Some(notes) = patch.notes {
            reservation.notes = notes;
        }

        reservation.customer_name = validate_name("customer_name", &reservation.customer_name)?;
        validate_party_size(reservation.party_size)?;
        validate_duration_minutes(reservation.duration_minutes)?;

        let table = self.resolve_table(&reservation.table_id).await?;
        check_capacity(&table, reservation.party_size)?;

        let window = TimeWindow::new(reservation.reserved_for, reservation.duration_minutes)
            .map_err(CoreError::from)?;

        let mut tx = self.db.pool().begin().await.map_err(DbError::from)?;

        let booked = ReservationRepository::fetch_booked_for_table(&mut *tx, &table.id).await?;
        // A reservation never conflicts with itself
        if !window_is_free(&window, &booked, Some(&reservation.id)) {
            return Err(CoreError::WindowConflict {
                table_number: table.number,
            }
            .into());
        }

        ReservationRepository::update_fields(&mut *tx, &reservation).await?;
        tx.commit().await.map_err(DbError::from)?;

        info!(id = %reservation.id, "Reservation updated");

        self.get(id).await
    }

    /// Deletes a reservation. Orders referencing it keep existing with a
    /// NULL reference.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.db.reservations().delete(id).await?;
        info!(id = %id, "Reservation deleted");
        Ok(())
    }

    /// Tables that can seat `party_size` for the requested window.
    pub async fn available_tables(
        &self,
        start: DateTime<Utc>,
        duration_minutes: i64,
        party_size: i64,
    ) -> ApiResult<Vec<Table>> {
        validate_party_size(party_size)?;
        let window = TimeWindow::new(start, duration_minutes).map_err(CoreError::from)?;

        let tables = self.db.tables().list_active().await?;
        let booked = self.db.reservations().list_booked().await?;

        Ok(filter_available(&tables, &booked, &window, party_size))
    }

    async fn resolve_table(&self, table_id: &str) -> ApiResult<Table> {
        let table = self
            .db
            .tables()
            .get_by_id(table_id)
            .await?
            .ok_or_else(|| CoreError::TableNotFound(table_id.to_string()))?;
        Ok(table)
    }
}

fn check_capacity(table: &Table, party_size: i64) -> Result<(), CoreError> {
    if party_size > table.capacity {
        return Err(CoreError::CapacityExceeded {
            party_size,
            capacity: table.capacity,
        });
    }
    Ok(())
}
