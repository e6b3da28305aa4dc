//! # Domain Types
//!
//! Core domain types for the restaurant backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐   ┌────────────────┐        │
//! │  │   MenuItem    │   │     Table     │   │  Reservation   │        │
//! │  │  ───────────  │   │  ───────────  │   │  ────────────  │        │
//! │  │  id (UUID)    │   │  id (UUID)    │   │  id (UUID)     │        │
//! │  │  name (uniq)  │   │  number (uniq)│   │  table_id (FK) │        │
//! │  │  price_cents  │   │  capacity     │   │  reserved_for  │        │
//! │  │  inventory    │   │  is_active    │   │  status        │        │
//! │  └───────────────┘   └───────────────┘   └────────────────┘        │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐                             │
//! │  │     Order     │   │   OrderItem   │                             │
//! │  │  ───────────  │   │  ───────────  │                             │
//! │  │  id (UUID)    │   │  id (UUID)    │                             │
//! │  │  status       │   │  order_id(FK) │                             │
//! │  │  total_cents  │   │  unit_price   │ ← snapshot, not live price  │
//! │  └───────────────┘   └───────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity carries `id`: UUID v4 as `String` - immutable, used for
//! database relations. Business identifiers (menu item name, table number)
//! are separate unique columns.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Menu Item
// =============================================================================

/// A dish or drink available for ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MenuItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, unique across the menu.
    pub name: String,

    /// Optional longer description (empty string when absent).
    pub description: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Units currently in stock. Mutated only by order creation.
    pub inventory_count: i64,

    /// Whether the item can currently be ordered.
    pub is_active: bool,

    /// Stock level at or below which the item appears in the
    /// low-stock report.
    pub low_stock_threshold: i64,

    /// When the item was created.
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether the current stock covers a requested quantity.
    #[inline]
    pub fn can_fulfil(&self, quantity: i64) -> bool {
        self.inventory_count >= quantity
    }

    /// Checks whether the item is at or below its low-stock threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.inventory_count <= self.low_stock_threshold
    }
}

// =============================================================================
// Table
// =============================================================================

/// A physical table on the restaurant floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Table {
    pub id: String,
    /// Floor number, unique and positive.
    pub number: i64,
    /// Maximum party size the table seats.
    pub capacity: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Reservation Status
// =============================================================================

/// The status of a reservation.
///
/// Only `Booked` reservations participate in availability conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Active booking, blocks the table for its window.
    #[default]
    Booked,
    /// Cancelled by the customer or staff; never blocks.
    Cancelled,
    /// The party came and went; never blocks.
    Completed,
}

// =============================================================================
// Reservation
// =============================================================================

/// A booking of one table for a party over a time window.
///
/// The window is half-open: `[reserved_for, reserved_until)`. A reservation
/// that ends exactly when another starts does not conflict with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: String,
    pub table_id: String,
    pub customer_name: String,
    /// Contact phone (empty string when not given).
    pub customer_phone: String,
    pub party_size: i64,
    /// Start of the reserved window (UTC).
    pub reserved_for: DateTime<Utc>,
    pub duration_minutes: i64,
    pub status: ReservationStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// End of the reserved window: `reserved_for + duration_minutes`.
    ///
    /// The end instant itself is not reserved (half-open interval), so a
    /// back-to-back booking starting at `reserved_until` is allowed.
    #[inline]
    pub fn reserved_until(&self) -> DateTime<Utc> {
        self.reserved_for + Duration::minutes(self.duration_minutes)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
///
/// ## State Machine
/// ```text
/// OPEN ──► PAID       (terminal)
///   │
///   └────► CANCELLED  (terminal)
/// ```
/// PAID and CANCELLED are terminal: a settled order cannot be re-paid,
/// re-cancelled, or reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Order taken, not yet settled.
    #[default]
    Open,
    /// Settled; counts toward daily sales.
    Paid,
    /// Abandoned; stock is not restored.
    Cancelled,
}

impl OrderStatus {
    /// Whether the status permits no further transitions.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::Open)
    }

    /// The uppercase wire name, as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "OPEN",
            OrderStatus::Paid => "PAID",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A bill for one sitting.
///
/// References a table, a reservation, or both; the references are
/// non-owning and survive as NULL if the target is later deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: String,
    pub table_id: Option<String>,
    pub reservation_id: Option<String>,
    pub status: OrderStatus,
    /// Derived: sum of line subtotals. Persisted so list/report queries
    /// never need a join.
    pub total_cents: i64,
    /// Set once at creation, immutable afterwards.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
///
/// Uses the snapshot pattern: `unit_price_cents` freezes the menu price at
/// order time, so later menu edits never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub menu_item_id: String,
    /// Menu item name at order time (frozen).
    pub name_snapshot: String,
    pub quantity: i64,
    /// Unit price in cents at order time (frozen).
    pub unit_price_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line subtotal: `unit_price × quantity`.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
