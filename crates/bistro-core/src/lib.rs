//! # bistro-core: Pure Business Logic for the Restaurant Backend
//!
//! This crate is the **heart** of the system. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Bistro Architecture                           │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (axum)                          │   │
//! │  │   /menu  /tables  /reservations  /orders  /reports          │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │               ★ bistro-core (THIS CRATE) ★                  │   │
//! │  │                                                             │   │
//! │  │  ┌──────────┐ ┌─────────┐ ┌──────────────┐ ┌────────────┐  │   │
//! │  │  │  types   │ │  money  │ │ availability │ │ validation │  │   │
//! │  │  │ MenuItem │ │  Money  │ │  TimeWindow  │ │   rules    │  │   │
//! │  │  │  Order   │ │  cents  │ │   overlap    │ │   checks   │  │   │
//! │  │  └──────────┘ └─────────┘ └──────────────┘ └────────────┘  │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │                  bistro-db (Database Layer)                  │   │
//! │  │            SQLite queries, migrations, repositories          │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, Table, Reservation, Order, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`availability`] - Half-open interval overlap math for reservations
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod availability;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bistro_core::Money` instead of
// `use bistro_core::money::Money`.

pub use availability::{filter_available, window_is_free, TimeWindow};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default reservation length when the caller does not specify one.
pub const DEFAULT_DURATION_MINUTES: i64 = 90;

/// Default low-stock threshold for new menu items.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Default party size for the table availability query.
pub const DEFAULT_PARTY_SIZE: i64 = 1;

/// Maximum lines allowed in a single order request.
///
/// ## Business Reason
/// Prevents runaway requests and keeps transactions reasonably sized.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum quantity of a single line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
