//! # bistro-db: Database Layer for the Restaurant Backend
//!
//! This crate provides database access for the restaurant system.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Data Flow                                   │
//! │                                                                     │
//! │  HTTP handler (GET /menu)                                           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                  bistro-db (THIS CRATE)                     │   │
//! │  │                                                             │   │
//! │  │   ┌─────────────┐   ┌──────────────┐   ┌──────────────┐    │   │
//! │  │   │  Database   │   │ Repositories │   │  Migrations  │    │   │
//! │  │   │  (pool.rs)  │   │ (menu.rs,    │   │  (embedded)  │    │   │
//! │  │   │             │◄──│  order.rs,   │   │              │    │   │
//! │  │   │ SqlitePool  │   │  ...)        │   │ 001_init.sql │    │   │
//! │  │   └─────────────┘   └──────────────┘   └──────────────┘    │   │
//! │  │                                                             │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite database file (or :memory: in tests)                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bistro_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/bistro.db")).await?;
//! let items = db.menu().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::menu::MenuRepository;
pub use repository::order::OrderRepository;
pub use repository::reservation::ReservationRepository;
pub use repository::table::TableRepository;
