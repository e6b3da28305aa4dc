//! # Bistro API
//!
//! HTTP server for the restaurant backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          API Server                                 │
//! │                                                                     │
//! │  Client ───► HTTP (8000) ───► routes ───► services ───► bistro-db  │
//! │                                  │            │                     │
//! │                                  │            ▼                     │
//! │                                  │       bistro-core                │
//! │                                  │   (availability, money,          │
//! │                                  │    validation rules)             │
//! │                                  ▼                                  │
//! │                        typed request/response                       │
//! │                        structs per endpoint                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `HTTP_PORT` - listen port (default: 8000)
//! - `DATABASE_PATH` - SQLite file path (default: ./bistro.db)
//! - `DB_MAX_CONNECTIONS` - pool size (default: 5)
//! - `RUST_LOG` - tracing filter (default: info)

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
