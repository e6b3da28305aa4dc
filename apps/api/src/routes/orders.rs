//! # Order Endpoints
//!
//! Read-only listing plus the two write operations: atomic creation and
//! the guarded status transition.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bistro_core::{CoreError, Money, OrderStatus, ValidationError};

use crate::error::ApiResult;
use crate::services::{NewOrder, OrderLineInput, OrderWithItems};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list))
        .route("/orders/create", post(create))
        .route("/orders/{id}", get(get_by_id))
        .route("/orders/{id}/status", post(update_status))
}

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Serialize)]
pub struct OrderItemResponse {
    pub id: String,
    /// Referenced menu item id.
    pub menu_item: String,
    /// Name at order time (snapshot).
    pub menu_item_name: String,
    pub quantity: i64,
    /// Unit price at order time (snapshot), two-decimal string.
    pub unit_price: String,
    pub subtotal: String,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub table: Option<String>,
    pub reservation: Option<String>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub total: String,
    pub items: Vec<OrderItemResponse>,
}

impl From<OrderWithItems> for OrderResponse {
    fn from(o: OrderWithItems) -> Self {
        OrderResponse {
            id: o.order.id,
            table: o.order.table_id,
            reservation: o.order.reservation_id,
            status: o.order.status,
            created_at: o.order.created_at,
            total: Money::from_cents(o.order.total_cents).to_decimal_string(),
            items: o
                .items
                .into_iter()
                .map(|item| OrderItemResponse {
                    id: item.id,
                    menu_item: item.menu_item_id,
                    menu_item_name: item.name_snapshot,
                    quantity: item.quantity,
                    unit_price: Money::from_cents(item.unit_price_cents).to_decimal_string(),
                    subtotal: Money::from_cents(item.unit_price_cents * item.quantity)
                        .to_decimal_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderLinePayload {
    pub menu_item: Option<String>,
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderPayload {
    pub table: Option<String>,
    pub reservation: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderLinePayload>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusPayload {
    pub status: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /orders - newest first.
async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<OrderResponse>>> {
    let orders = state.orders.list().await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// GET /orders/{id}
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<OrderResponse>> {
    let order = state.orders.get(&id).await?;
    Ok(Json(order.into()))
}

/// POST /orders/create
///
/// Body: `{"table": id?, "reservation": id?, "items": [{"menu_item": id,
/// "quantity": n}]}`. 201 with the full order on success; nothing persists
/// on any failure.
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderPayload>,
) -> ApiResult<(StatusCode, Json<OrderResponse>)> {
    let mut lines = Vec::with_capacity(payload.items.len());
    for line in payload.items {
        let menu_item_id = line.menu_item.ok_or(ValidationError::Required {
            field: "items[].menu_item".to_string(),
        })?;
        let quantity = line.quantity.ok_or(ValidationError::Required {
            field: "items[].quantity".to_string(),
        })?;
        lines.push(OrderLineInput {
            menu_item_id,
            quantity,
        });
    }

    let order = state
        .orders
        .create_order(NewOrder {
            table_id: payload.table,
            reservation_id: payload.reservation,
            lines,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(order.into())))
}

/// POST /orders/{id}/status
///
/// Body: `{"status": "PAID"|"CANCELLED"}`. Only OPEN orders transition;
/// PAID and CANCELLED are terminal.
async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusPayload>,
) -> ApiResult<Json<OrderResponse>> {
    let new_status = match payload.status.as_deref() {
        Some("PAID") => OrderStatus::Paid,
        Some("CANCELLED") => OrderStatus::Cancelled,
        _ => {
            return Err(CoreError::Validation(ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: vec!["PAID".to_string(), "CANCELLED".to_string()],
            })
            .into())
        }
    };

    let order = state.orders.update_status(&id, new_status).await?;
    Ok(Json(order.into()))
}
