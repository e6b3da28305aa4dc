//! # Order Service
//!
//! The transactional order-creation workflow and the guarded status
//! machine.
//!
//! ## All-Or-Nothing Creation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  POST /orders/create                                                │
//! │                                                                     │
//! │  1. resolve table / reservation            (404 if missing)         │
//! │  2. BEGIN                                                           │
//! │  3. resolve + stock-check EVERY line       ← no write yet           │
//! │  4. insert order (OPEN, total 0)                                    │
//! │  5. per line: insert item (price snapshot)                          │
//! │               deduct stock conditionally   ← 0 rows = lost race     │
//! │  6. total = Σ unit_price × qty, persist                             │
//! │  7. COMMIT                                                          │
//! │                                                                     │
//! │  Any failure between BEGIN and COMMIT rolls back everything: no     │
//! │  order row, no lines, no stock change.                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Step 3 guarantees a stock failure is detected before any mutation;
//! the conditional update in step 5 closes the remaining concurrency
//! window (two orders racing for the same stock).

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use bistro_core::{
    validation::{validate_order_lines, validate_quantity},
    CoreError, Money, Order, OrderItem, OrderStatus, ValidationError,
};
use bistro_db::repository::menu::MenuRepository;
use bistro_db::repository::order::{generate_order_id, generate_order_item_id, OrderRepository};
use bistro_db::{Database, DbError};

use crate::error::ApiResult;

/// One requested order line.
#[derive(Debug, Clone)]
pub struct OrderLineInput {
    pub menu_item_id: String,
    pub quantity: i64,
}

/// Input for creating an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub table_id: Option<String>,
    pub reservation_id: Option<String>,
    pub lines: Vec<OrderLineInput>,
}

/// An order with its lines, as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Service for order workflows.
#[derive(Clone)]
pub struct OrderService {
    db: Database,
}

impl OrderService {
    pub fn new(db: Database) -> Self {
        OrderService { db }
    }

    /// Lists all orders with their items, newest first.
    pub async fn list(&self) -> ApiResult<Vec<OrderWithItems>> {
        let orders = self.db.orders().list().await?;

        let mut result = Vec::with_capacity(orders.len());
        for order in orders {
            let items = self.db.orders().get_items(&order.id).await?;
            result.push(OrderWithItems { order, items });
        }

        Ok(result)
    }

    /// Gets one order with its items.
    pub async fn get(&self, id: &str) -> ApiResult<OrderWithItems> {
        let order = self
            .db
            .orders()
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::OrderNotFound(id.to_string()))?;
        let items = self.db.orders().get_items(id).await?;

        Ok(OrderWithItems { order, items })
    }

    /// Creates an order atomically: validates every line in full before any
    /// mutation, snapshots unit prices, deducts stock, computes the total.
    pub async fn create_order(&self, input: NewOrder) -> ApiResult<OrderWithItems> {
        if input.table_id.is_none() && input.reservation_id.is_none() {
            return Err(CoreError::MissingOrderTarget.into());
        }
        if input.lines.is_empty() {
            return Err(CoreError::EmptyOrder.into());
        }
        validate_order_lines(input.lines.len())?;
        for line in &input.lines {
            validate_quantity(line.quantity)?;
        }

        // Resolve references up front so a bad id is a 404, not a rollback
        if let Some(table_id) = &input.table_id {
            self.db
                .tables()
                .get_by_id(table_id)
                .await?
                .ok_or_else(|| CoreError::TableNotFound(table_id.clone()))?;
        }
        if let Some(reservation_id) = &input.reservation_id {
            self.db
                .reservations()
                .get_by_id(reservation_id)
                .await?
                .ok_or_else(|| CoreError::ReservationNotFound(reservation_id.clone()))?;
        }

        // Everything below shares one transaction; returning early drops it
        // and rolls back every write made so far.
        let mut tx = self.db.pool().begin().await.map_err(DbError::from)?;

        // Phase 1: resolve and stock-check EVERY line before any write
        let mut resolved = Vec::with_capacity(input.lines.len());
        for line in &input.lines {
            let item = MenuRepository::fetch_active(&mut *tx, &line.menu_item_id)
                .await?
                .ok_or_else(|| CoreError::MenuItemNotFound(line.menu_item_id.clone()))?;

            if !item.can_fulfil(line.quantity) {
                return Err(CoreError::InsufficientStock {
                    name: item.name,
                    available: item.inventory_count,
                    requested: line.quantity,
                }
                .into());
            }

            resolved.push((item, line.quantity));
        }

        // Phase 2: write order, lines and stock deductions
        let now = Utc::now();
        let order = Order {
            id: generate_order_id(),
            table_id: input.table_id,
            reservation_id: input.reservation_id,
            status: OrderStatus::Open,
            total_cents: 0,
            created_at: now,
        };
        OrderRepository::create(&mut *tx, &order).await?;

        for (item, quantity) in &resolved {
            let order_item = OrderItem {
                id: generate_order_item_id(),
                order_id: order.id.clone(),
                menu_item_id: item.id.clone(),
                // Snapshot: the bill keeps this name and price even if the
                // menu changes tomorrow
                name_snapshot: item.name.clone(),
                quantity: *quantity,
                unit_price_cents: item.price_cents,
                created_at: now,
            };
            OrderRepository::add_item(&mut *tx, &order_item).await?;

            let affected = MenuRepository::deduct_stock(&mut *tx, &item.id, *quantity).await?;
            if affected == 0 {
                // A concurrent order consumed the stock between our check
                // and this update; the guard refused and we roll back
                return Err(CoreError::InsufficientStock {
                    name: item.name.clone(),
                    available: item.inventory_count,
                    requested: *quantity,
                }
                .into());
            }
        }

        let total: Money = resolved
            .iter()
            .map(|(item, quantity)| item.price().multiply_quantity(*quantity))
            .sum();
        OrderRepository::set_total(&mut *tx, &order.id, total.cents()).await?;

        tx.commit().await.map_err(DbError::from)?;

        info!(
            id = %order.id,
            total = %total,
            lines = resolved.len(),
            "Order created"
        );

        self.get(&order.id).await
    }

    /// Applies a status transition: OPEN → PAID or OPEN → CANCELLED.
    ///
    /// PAID and CANCELLED are terminal; a settled order is rejected.
    /// Cancelling does not restore stock.
    pub async fn update_status(&self, id: &str, new_status: OrderStatus) -> ApiResult<OrderWithItems> {
        if new_status == OrderStatus::Open {
            return Err(ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: vec!["PAID".to_string(), "CANCELLED".to_string()],
            }
            .into());
        }

        // Distinguish "missing" from "terminal" before the guarded update
        let current = self
            .db
            .orders()
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::OrderNotFound(id.to_string()))?;

        let affected = self.db.orders().update_status(id, new_status).await?;
        if affected == 0 {
            // Either terminal already, or a concurrent transition won; the
            // row's current status names the loser's reason either way
            let current = self
                .db
                .orders()
                .get_by_id(id)
                .await?
                .unwrap_or(current);
            return Err(CoreError::InvalidOrderStatus {
                order_id: id.to_string(),
                current_status: current.status.as_str().to_string(),
            }
            .into());
        }

        info!(id = %id, status = %new_status.as_str(), "Order status updated");

        self.get(id).await
    }
}
