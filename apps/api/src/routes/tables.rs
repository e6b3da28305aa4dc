//! # Table Endpoints
//!
//! Table CRUD plus the availability query, which is the HTTP face of the
//! availability engine.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use bistro_core::{
    validation::{validate_capacity, validate_table_number},
    CoreError, Table, ValidationError, DEFAULT_DURATION_MINUTES, DEFAULT_PARTY_SIZE,
};
use bistro_db::repository::table::generate_table_id;

use crate::error::ApiResult;
use crate::routes::parse_datetime;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tables", get(list).post(create))
        // Static segment wins over the {id} capture below
        .route("/tables/availability", get(availability))
        .route(
            "/tables/{id}",
            get(get_by_id).put(update).patch(update).delete(delete),
        )
}

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Serialize)]
pub struct TableResponse {
    pub id: String,
    pub number: i64,
    pub capacity: i64,
    pub is_active: bool,
}

impl From<Table> for TableResponse {
    fn from(table: Table) -> Self {
        TableResponse {
            id: table.id,
            number: table.number,
            capacity: table.capacity,
            is_active: table.is_active,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TablePayload {
    pub number: Option<i64>,
    pub capacity: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub start: Option<String>,
    pub duration_minutes: Option<i64>,
    pub party_size: Option<i64>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /tables - all tables, ordered by floor number.
async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<TableResponse>>> {
    let tables = state.db.tables().list().await?;
    Ok(Json(tables.into_iter().map(Into::into).collect()))
}

/// GET /tables/{id}
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<TableResponse>> {
    let table = state
        .db
        .tables()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| CoreError::TableNotFound(id.clone()))?;
    Ok(Json(table.into()))
}

/// POST /tables
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<TablePayload>,
) -> ApiResult<(StatusCode, Json<TableResponse>)> {
    let number = payload.number.ok_or(ValidationError::Required {
        field: "number".to_string(),
    })?;
    validate_table_number(number)?;

    let capacity = payload.capacity.ok_or(ValidationError::Required {
        field: "capacity".to_string(),
    })?;
    validate_capacity(capacity)?;

    let now = Utc::now();
    let table = Table {
        id: generate_table_id(),
        number,
        capacity,
        is_active: payload.is_active.unwrap_or(true),
        created_at: now,
        updated_at: now,
    };

    let created = state.db.tables().insert(&table).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PUT/PATCH /tables/{id} - absent fields keep their stored values.
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<TablePayload>,
) -> ApiResult<Json<TableResponse>> {
    let mut table = state
        .db
        .tables()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| CoreError::TableNotFound(id.clone()))?;

    if let Some(number) = payload.number {
        validate_table_number(number)?;
        table.number = number;
    }
    if let Some(capacity) = payload.capacity {
        validate_capacity(capacity)?;
        table.capacity = capacity;
    }
    if let Some(is_active) = payload.is_active {
        table.is_active = is_active;
    }

    state.db.tables().update(&table).await?;

    let updated = state
        .db
        .tables()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| CoreError::TableNotFound(id.clone()))?;
    Ok(Json(updated.into()))
}

/// DELETE /tables/{id} - reservations cascade, order references go NULL.
async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.db.tables().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /tables/availability?start=...&duration_minutes=...&party_size=...
///
/// Returns the active tables that can seat the party for the window.
/// 400 when `start` is missing or unparseable, or when duration/party_size
/// are non-positive.
async fn availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> ApiResult<Json<Vec<TableResponse>>> {
    let start_raw = query.start.ok_or(ValidationError::Required {
        field: "start".to_string(),
    })?;
    let start = parse_datetime("start", &start_raw)?;

    let duration_minutes = query.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
    let party_size = query.party_size.unwrap_or(DEFAULT_PARTY_SIZE);

    let tables = state
        .reservations
        .available_tables(start, duration_minutes, party_size)
        .await?;

    Ok(Json(tables.into_iter().map(Into::into).collect()))
}
