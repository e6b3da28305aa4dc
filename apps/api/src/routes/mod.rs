//! # HTTP Routes
//!
//! The explicit routing table: one module per resource, merged into a
//! single router. Every endpoint has typed request/response structs in its
//! resource module; handlers translate between the HTTP boundary and the
//! services/repositories.
//!
//! ```text
//! /menu, /menu/{id}                    menu.rs
//! /tables, /tables/{id}                tables.rs
//! /tables/availability                 tables.rs
//! /reservations, /reservations/{id}    reservations.rs
//! /orders, /orders/{id}                orders.rs
//! /orders/create, /orders/{id}/status  orders.rs
//! /reports/daily-sales, /low-stock     reports.rs
//! /health                              (below)
//! ```

pub mod menu;
pub mod orders;
pub mod reports;
pub mod reservations;
pub mod tables;

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use bistro_core::{
    validation::validate_price_cents, Money, ValidationError,
};

use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::state::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(menu::router())
        .merge(tables::router())
        .merge(reservations::router())
        .merge(orders::router())
        .merge(reports::router())
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Health
// =============================================================================

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// GET /health - liveness probe, pings the store.
async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    if !state.db.health_check().await {
        return Err(ApiError::new(
            ErrorCode::DatabaseError,
            "Database unavailable",
        ));
    }

    Ok(Json(HealthResponse { status: "ok" }))
}

// =============================================================================
// Shared Parsers
// =============================================================================

/// Parses a two-decimal money string from a request body.
pub(crate) fn parse_price(field: &str, raw: &str) -> ApiResult<Money> {
    let money = Money::from_decimal_str(raw).ok_or_else(|| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a decimal number with at most two places".to_string(),
    })?;
    validate_price_cents(money.cents())?;
    Ok(money)
}

/// Parses an ISO-8601 timestamp.
///
/// Accepts RFC 3339 (`2026-03-01T18:00:00Z`, with offset) as well as naive
/// timestamps (`2026-03-01T18:00`), which are taken as UTC.
pub(crate) fn parse_datetime(field: &str, raw: &str) -> ApiResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    Err(ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be an ISO-8601 timestamp".to_string(),
    }
    .into())
}
