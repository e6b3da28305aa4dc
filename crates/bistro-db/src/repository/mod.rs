//! # Repository Module
//!
//! Database repository implementations for the restaurant backend.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                     │
//! │                                                                     │
//! │  The Repository pattern abstracts database access behind a clean    │
//! │  API.                                                               │
//! │                                                                     │
//! │  Service / Handler                                                  │
//! │       │                                                             │
//! │       │  db.menu().list()                                           │
//! │       ▼                                                             │
//! │  MenuRepository                                                     │
//! │  ├── list(&self)                                                    │
//! │  ├── get_by_id(&self, id)                                           │
//! │  ├── insert(&self, item)                                            │
//! │  └── deduct_stock(tx, id, qty)   ← transaction-scoped               │
//! │       │                                                             │
//! │       │  SQL Query                                                  │
//! │       ▼                                                             │
//! │  SQLite Database                                                    │
//! │                                                                     │
//! │  Benefits:                                                          │
//! │  • SQL is isolated in one place                                     │
//! │  • Multi-statement workflows share one transaction                  │
//! │  • Easy to exercise against an in-memory database in tests          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`menu::MenuRepository`] - Menu CRUD, stock deduction, low-stock query
//! - [`table::TableRepository`] - Table CRUD
//! - [`reservation::ReservationRepository`] - Reservation CRUD and booked-set reads
//! - [`order::OrderRepository`] - Order/line writes, status transitions, sales report

pub mod menu;
pub mod order;
pub mod reservation;
pub mod table;
