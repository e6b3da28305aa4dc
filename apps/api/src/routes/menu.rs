//! # Menu Endpoints
//!
//! CRUD for menu items. Plain data access: handlers talk to the repository
//! directly, there is no workflow to orchestrate.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use bistro_core::{
    validation::{validate_inventory_count, validate_name},
    CoreError, MenuItem, Money, ValidationError, DEFAULT_LOW_STOCK_THRESHOLD,
};
use bistro_db::repository::menu::generate_menu_item_id;

use crate::error::ApiResult;
use crate::routes::parse_price;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/menu", get(list).post(create))
        .route(
            "/menu/{id}",
            get(get_by_id).put(update).patch(update).delete(delete),
        )
}

// =============================================================================
// DTOs
// =============================================================================

/// Menu item representation in responses. Prices are two-decimal strings.
#[derive(Debug, Serialize)]
pub struct MenuItemResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub inventory_count: i64,
    pub is_active: bool,
    pub low_stock_threshold: i64,
}

impl From<MenuItem> for MenuItemResponse {
    fn from(item: MenuItem) -> Self {
        MenuItemResponse {
            id: item.id,
            name: item.name,
            description: item.description,
            price: Money::from_cents(item.price_cents).to_decimal_string(),
            inventory_count: item.inventory_count,
            is_active: item.is_active,
            low_stock_threshold: item.low_stock_threshold,
        }
    }
}

/// Create/update payload. All fields optional so PUT and PATCH share
/// partial-update semantics; create requires name and price.
#[derive(Debug, Deserialize)]
pub struct MenuItemPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub inventory_count: Option<i64>,
    pub is_active: Option<bool>,
    pub low_stock_threshold: Option<i64>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /menu - all menu items, ordered by name.
async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<MenuItemResponse>>> {
    let items = state.db.menu().list().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// GET /menu/{id}
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MenuItemResponse>> {
    let item = state
        .db
        .menu()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| CoreError::MenuItemNotFound(id.clone()))?;
    Ok(Json(item.into()))
}

/// POST /menu
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<MenuItemPayload>,
) -> ApiResult<(StatusCode, Json<MenuItemResponse>)> {
    let name = payload.name.ok_or(ValidationError::Required {
        field: "name".to_string(),
    })?;
    let name = validate_name("name", &name)?;

    let price_raw = payload.price.ok_or(ValidationError::Required {
        field: "price".to_string(),
    })?;
    let price = parse_price("price", &price_raw)?;

    let inventory_count = payload.inventory_count.unwrap_or(0);
    validate_inventory_count(inventory_count)?;

    let now = Utc::now();
    let item = MenuItem {
        id: generate_menu_item_id(),
        name,
        description: payload.description.unwrap_or_default(),
        price_cents: price.cents(),
        inventory_count,
        is_active: payload.is_active.unwrap_or(true),
        low_stock_threshold: payload.low_stock_threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD),
        created_at: now,
        updated_at: now,
    };

    let created = state.db.menu().insert(&item).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PUT/PATCH /menu/{id} - absent fields keep their stored values.
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemPayload>,
) -> ApiResult<Json<MenuItemResponse>> {
    let mut item = state
        .db
        .menu()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| CoreError::MenuItemNotFound(id.clone()))?;

    if let Some(name) = payload.name {
        item.name = validate_name("name", &name)?;
    }
    if let Some(description) = payload.description {
        item.description = description;
    }
    if let Some(price_raw) = payload.price {
        item.price_cents = parse_price("price", &price_raw)?.cents();
    }
    if let Some(inventory_count) = payload.inventory_count {
        validate_inventory_count(inventory_count)?;
        item.inventory_count = inventory_count;
    }
    if let Some(is_active) = payload.is_active {
        item.is_active = is_active;
    }
    if let Some(threshold) = payload.low_stock_threshold {
        item.low_stock_threshold = threshold;
    }

    state.db.menu().update(&item).await?;

    let updated = state
        .db
        .menu()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| CoreError::MenuItemNotFound(id.clone()))?;
    Ok(Json(updated.into()))
}

/// DELETE /menu/{id} - blocked while any order line references the item.
async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.db.menu().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
