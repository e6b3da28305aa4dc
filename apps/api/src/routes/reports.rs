//! # Report Endpoints
//!
//! Read-only aggregations: daily sales and low-stock alerts.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bistro_core::ValidationError;

use crate::error::ApiResult;
use crate::routes::menu::MenuItemResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reports/daily-sales", get(daily_sales))
        .route("/reports/low-stock", get(low_stock))
}

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct DailySalesQuery {
    /// YYYY-MM-DD; defaults to today (server-local).
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DailySalesResponse {
    pub date: String,
    /// Number of PAID orders that day.
    pub orders: i64,
    /// Summed totals of those orders, two-decimal string.
    pub total_sales: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /reports/daily-sales?date=YYYY-MM-DD
async fn daily_sales(
    State(state): State<AppState>,
    Query(query): Query<DailySalesQuery>,
) -> ApiResult<Json<DailySalesResponse>> {
    let date = match query.date.as_deref() {
        Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            ValidationError::InvalidFormat {
                field: "date".to_string(),
                reason: "must be YYYY-MM-DD".to_string(),
            }
        })?),
        None => None,
    };

    let report = state.reports.daily_sales(date).await?;

    Ok(Json(DailySalesResponse {
        date: report.date.to_string(),
        orders: report.orders,
        total_sales: report.total_sales.to_decimal_string(),
    }))
}

/// GET /reports/low-stock - items at or below their threshold, lowest
/// stock first.
async fn low_stock(State(state): State<AppState>) -> ApiResult<Json<Vec<MenuItemResponse>>> {
    let items = state.reports.low_stock().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}
