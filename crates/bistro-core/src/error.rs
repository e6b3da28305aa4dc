//! # Error Types
//!
//! Domain-specific error types for bistro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  bistro-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  bistro-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                 │
//! │                                                                     │
//! │  API errors (in app)                                                │
//! │  └── ApiError         - What HTTP clients see (serialized)          │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, id, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Menu item cannot be found (or is inactive).
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    /// Table cannot be found.
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Reservation cannot be found.
    #[error("Reservation not found: {0}")]
    ReservationNotFound(String),

    /// Order cannot be found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Insufficient stock to fulfil an order line.
    ///
    /// ## When This Occurs
    /// - A requested quantity exceeds the item's current inventory
    /// - A concurrent order consumed the stock between check and commit
    ///
    /// ## Order Flow
    /// ```text
    /// POST /orders/create (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Margherita", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// 400 {"error": "Insufficient stock for 'Margherita': ..."}
    /// ```
    #[error("Insufficient stock for '{name}': available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Party does not fit at the requested table.
    #[error("Party size {party_size} exceeds table capacity {capacity}")]
    CapacityExceeded { party_size: i64, capacity: i64 },

    /// The requested time window overlaps an existing booked reservation.
    ///
    /// Only reservations with status `booked` count as conflict sources;
    /// cancelled and completed reservations never block a table.
    #[error("Table {table_number} is not available for the requested time window")]
    WindowConflict { table_number: i64 },

    /// An order must reference a table, a reservation, or both.
    #[error("Provide either a table or a reservation for the order")]
    MissingOrderTarget,

    /// An order must contain at least one line.
    #[error("Order must contain at least one item")]
    EmptyOrder,

    /// Order is not in a state that allows the requested transition.
    ///
    /// ## When This Occurs
    /// - Trying to pay or cancel an order that is already PAID or CANCELLED
    ///
    /// The status machine is OPEN → {PAID, CANCELLED}; both targets are
    /// terminal.
    #[error("Order {order_id} is {current_status}, only OPEN orders can change status")]
    InvalidOrderStatus {
        order_id: String,
        current_status: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, invalid timestamp, bad decimal).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., duplicate menu item name).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Margherita".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for 'Margherita': available 3, requested 5"
        );

        let err = CoreError::CapacityExceeded {
            party_size: 5,
            capacity: 4,
        };
        assert_eq!(err.to_string(), "Party size 5 exceeds table capacity 4");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "customer_name".to_string(),
        };
        assert_eq!(err.to_string(), "customer_name is required");

        let err = ValidationError::MustBePositive {
            field: "duration_minutes".to_string(),
        };
        assert_eq!(err.to_string(), "duration_minutes must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
