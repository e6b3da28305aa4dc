//! # Reservation Endpoints
//!
//! Write paths run the reservation service's capacity and overlap
//! validation; `status` is read-only through the general update path.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bistro_core::{Reservation, ReservationStatus, ValidationError, DEFAULT_DURATION_MINUTES};

use crate::error::ApiResult;
use crate::routes::parse_datetime;
use crate::services::{NewReservation, ReservationPatch};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reservations", get(list).post(create))
        .route(
            "/reservations/{id}",
            get(get_by_id).put(update).patch(update).delete(delete),
        )
}

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub id: String,
    /// Referenced table id.
    pub table: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub party_size: i64,
    pub reserved_for: DateTime<Utc>,
    pub duration_minutes: i64,
    pub status: ReservationStatus,
    pub notes: String,
    /// Derived: `reserved_for + duration_minutes`.
    pub reserved_until: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        let reserved_until = r.reserved_until();
        ReservationResponse {
            id: r.id,
            table: r.table_id,
            customer_name: r.customer_name,
            customer_phone: r.customer_phone,
            party_size: r.party_size,
            reserved_for: r.reserved_for,
            duration_minutes: r.duration_minutes,
            status: r.status,
            notes: r.notes,
            reserved_until,
        }
    }
}

/// Create/update payload. `status` is deliberately not a field here.
#[derive(Debug, Deserialize)]
pub struct ReservationPayload {
    pub table: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub party_size: Option<i64>,
    pub reserved_for: Option<String>,
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /reservations - most recent start first.
async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<ReservationResponse>>> {
    let reservations = state.reservations.list().await?;
    Ok(Json(reservations.into_iter().map(Into::into).collect()))
}

/// GET /reservations/{id}
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ReservationResponse>> {
    let reservation = state.reservations.get(&id).await?;
    Ok(Json(reservation.into()))
}

/// POST /reservations
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ReservationPayload>,
) -> ApiResult<(StatusCode, Json<ReservationResponse>)> {
    let table_id = payload.table.ok_or(ValidationError::Required {
        field: "table".to_string(),
    })?;
    let customer_name = payload.customer_name.ok_or(ValidationError::Required {
        field: "customer_name".to_string(),
    })?;
    let party_size = payload.party_size.ok_or(ValidationError::Required {
        field: "party_size".to_string(),
    })?;
    let reserved_for_raw = payload.reserved_for.ok_or(ValidationError::Required {
        field: "reserved_for".to_string(),
    })?;
    let reserved_for = parse_datetime("reserved_for", &reserved_for_raw)?;

    let reservation = state
        .reservations
        .create(NewReservation {
            table_id,
            customer_name,
            customer_phone: payload.customer_phone.unwrap_or_default(),
            party_size,
            reserved_for,
            duration_minutes: payload.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES),
            notes: payload.notes.unwrap_or_default(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(reservation.into())))
}

/// PUT/PATCH /reservations/{id} - absent fields keep their stored values;
/// the reservation's own window is excluded from the overlap check.
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ReservationPayload>,
) -> ApiResult<Json<ReservationResponse>> {
    let reserved_for = match payload.reserved_for {
        Some(raw) => Some(parse_datetime("reserved_for", &raw)?),
        None => None,
    };

    let reservation = state
        .reservations
        .update(
            &id,
            ReservationPatch {
                table_id: payload.table,
                customer_name: payload.customer_name,
                customer_phone: payload.customer_phone,
                party_size: payload.party_size,
                reserved_for,
                duration_minutes: payload.duration_minutes,
                notes: payload.notes,
            },
        )
        .await?;

    Ok(Json(reservation.into()))
}

/// DELETE /reservations/{id}
async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.reservations.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
