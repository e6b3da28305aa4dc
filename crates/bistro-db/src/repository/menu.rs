//! # Menu Repository
//!
//! Database operations for menu items.
//!
//! ## Key Operations
//! - CRUD for menu management
//! - Conditional inventory deduction (the oversell guard)
//! - Low-stock report query
//!
//! ## The Oversell Guard
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Concurrent Order Problem                           │
//! │                                                                     │
//! │  Order A: check stock (5) ──────────► deduct 4   stock = 1          │
//! │  Order B: ....check stock (5) ──────────► deduct 4   stock = -3 ❌  │
//! │                                                                     │
//! │  FIX: deduct conditionally inside the order transaction             │
//! │                                                                     │
//! │    UPDATE menu_items                                                │
//! │    SET inventory_count = inventory_count - ?qty                     │
//! │    WHERE id = ?id AND inventory_count >= ?qty                       │
//! │                                                                     │
//! │  Zero rows affected → a concurrent order won the race → the whole   │
//! │  order transaction rolls back, nothing persists.                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use bistro_core::MenuItem;

/// Column list shared by every menu item SELECT.
const MENU_COLUMNS: &str = "id, name, description, price_cents, inventory_count, \
     is_active, low_stock_threshold, created_at, updated_at";

/// Repository for menu item database operations.
#[derive(Debug, Clone)]
pub struct MenuRepository {
    pool: SqlitePool,
}

impl MenuRepository {
    /// Creates a new MenuRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MenuRepository { pool }
    }

    /// Lists all menu items ordered by name.
    pub async fn list(&self) -> DbResult<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_items ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets a menu item by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(MenuItem))` - item found
    /// * `Ok(None)` - item not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_items WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Inserts a new menu item.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - name already exists
    pub async fn insert(&self, item: &MenuItem) -> DbResult<MenuItem> {
        debug!(name = %item.name, "Inserting menu item");

        sqlx::query(
            r#"
            INSERT INTO menu_items (
                id, name, description, price_cents, inventory_count,
                is_active, low_stock_threshold, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price_cents)
        .bind(item.inventory_count)
        .bind(item.is_active)
        .bind(item.low_stock_threshold)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(item.clone())
    }

    /// Updates an existing menu item.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - item doesn't exist
    pub async fn update(&self, item: &MenuItem) -> DbResult<()> {
        debug!(id = %item.id, "Updating menu item");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE menu_items SET
                name = ?2,
                description = ?3,
                price_cents = ?4,
                inventory_count = ?5,
                is_active = ?6,
                low_stock_threshold = ?7,
                updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price_cents)
        .bind(item.inventory_count)
        .bind(item.is_active)
        .bind(item.low_stock_threshold)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Menu item", &item.id));
        }

        Ok(())
    }

    /// Deletes a menu item.
    ///
    /// ## Referential Protection
    /// The `ON DELETE RESTRICT` foreign key from order_items blocks the
    /// delete while any order line references the item; that surfaces as
    /// `DbError::ForeignKeyViolation`.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting menu item");

        let result = sqlx::query("DELETE FROM menu_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Menu item", id));
        }

        Ok(())
    }

    /// Returns items at or below their low-stock threshold, lowest stock
    /// first.
    pub async fn low_stock(&self) -> DbResult<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_items \
             WHERE inventory_count <= low_stock_threshold \
             ORDER BY inventory_count"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    // =========================================================================
    // Transaction-Scoped Operations
    // =========================================================================
    // These take a `&mut SqliteConnection` so the order workflow can run its
    // reads and writes on one transaction (`&mut *tx`).

    /// Fetches an active menu item inside a caller-owned transaction.
    pub async fn fetch_active(
        conn: &mut SqliteConnection,
        id: &str,
    ) -> DbResult<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_items WHERE id = ?1 AND is_active = 1"
        ))
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(item)
    }

    /// Conditionally deducts stock inside a caller-owned transaction.
    ///
    /// ## Returns
    /// Rows affected: 1 when the deduction applied, 0 when the guard
    /// `inventory_count >= quantity` failed (insufficient stock at commit
    /// time). The caller must treat 0 as a signal to roll back.
    pub async fn deduct_stock(
        conn: &mut SqliteConnection,
        id: &str,
        quantity: i64,
    ) -> DbResult<u64> {
        debug!(id = %id, quantity = %quantity, "Deducting stock");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE menu_items
            SET inventory_count = inventory_count - ?2,
                updated_at = ?3
            WHERE id = ?1 AND inventory_count >= ?2
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(now)
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }
}

/// Helper to generate a new menu item ID.
pub fn generate_menu_item_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
