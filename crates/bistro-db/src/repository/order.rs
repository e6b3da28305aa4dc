//! # Order Repository
//!
//! Database operations for orders and order items.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                               │
//! │                                                                     │
//! │  1. CREATE (one transaction, all-or-nothing)                        │
//! │     ├── create(tx)      → Order { status: OPEN, total: 0 }          │
//! │     ├── add_item(tx)    → snapshot of name + unit price per line    │
//! │     ├── (stock deducted via MenuRepository::deduct_stock)           │
//! │     └── set_total(tx)   → Σ unit_price × quantity                   │
//! │                                                                     │
//! │  2. SETTLE                                                          │
//! │     └── update_status() → PAID or CANCELLED, only from OPEN         │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Item name and unit price are copied onto the order line at creation.
//! This preserves the bill even if the menu changes later.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use bistro_core::{Order, OrderItem, OrderStatus};

const ORDER_COLUMNS: &str = "id, table_id, reservation_id, status, total_cents, created_at";

const ITEM_COLUMNS: &str =
    "id, order_id, menu_item_id, name_snapshot, quantity, unit_price_cents, created_at";

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Lists all orders, newest first.
    pub async fn list(&self) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Gets an order by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets all items for an order.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ?1 ORDER BY created_at"
        ))
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Moves an order out of OPEN.
    ///
    /// ## Guarded Transition
    /// The `WHERE status = 'OPEN'` clause enforces the state machine at the
    /// store: PAID and CANCELLED rows never match, so a settled order cannot
    /// be settled twice.
    ///
    /// ## Returns
    /// Rows affected: 1 when the transition applied, 0 when the order does
    /// not exist or is already terminal (caller distinguishes the two).
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> DbResult<u64> {
        debug!(id = %id, status = %status.as_str(), "Updating order status");

        let result = sqlx::query("UPDATE orders SET status = ?2 WHERE id = ?1 AND status = 'OPEN'")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Count and summed total of PAID orders created in `[start, end)`.
    ///
    /// Returns `(0, 0)` when the range holds no paid orders.
    pub async fn daily_sales(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbResult<(i64, i64)> {
        let row = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*), COALESCE(SUM(total_cents), 0)
            FROM orders
            WHERE status = 'PAID' AND created_at >= ?1 AND created_at < ?2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    // =========================================================================
    // Transaction-Scoped Operations
    // =========================================================================
    // The create-order workflow writes the order, its lines, the stock
    // deductions and the total on ONE transaction; nothing of it survives a
    // rollback.

    /// Inserts an order row inside a caller-owned transaction.
    pub async fn create(conn: &mut SqliteConnection, order: &Order) -> DbResult<()> {
        debug!(id = %order.id, "Inserting order");

        sqlx::query(
            r#"
            INSERT INTO orders (id, table_id, reservation_id, status, total_cents, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&order.id)
        .bind(&order.table_id)
        .bind(&order.reservation_id)
        .bind(order.status)
        .bind(order.total_cents)
        .bind(order.created_at)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Inserts an order line inside a caller-owned transaction.
    pub async fn add_item(conn: &mut SqliteConnection, item: &OrderItem) -> DbResult<()> {
        debug!(order_id = %item.order_id, menu_item_id = %item.menu_item_id, "Inserting order item");

        sqlx::query(
            r#"
            INSERT INTO order_items (
                id, order_id, menu_item_id, name_snapshot,
                quantity, unit_price_cents, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&item.id)
        .bind(&item.order_id)
        .bind(&item.menu_item_id)
        .bind(&item.name_snapshot)
        .bind(item.quantity)
        .bind(item.unit_price_cents)
        .bind(item.created_at)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Persists the computed total inside a caller-owned transaction.
    pub async fn set_total(
        conn: &mut SqliteConnection,
        order_id: &str,
        total_cents: i64,
    ) -> DbResult<()> {
        let result = sqlx::query("UPDATE orders SET total_cents = ?2 WHERE id = ?1")
            .bind(order_id)
            .bind(total_cents)
            .execute(conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", order_id));
        }

        Ok(())
    }
}

/// Helper to generate a new order ID.
pub fn generate_order_id() -> String {
    Uuid::new_v4().to_string()
}

/// Helper to generate a new order item ID.
pub fn generate_order_item_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
