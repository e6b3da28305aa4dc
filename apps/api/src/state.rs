//! # Application State
//!
//! Shared state handed to every handler through axum's `State` extractor.
//!
//! Repositories and services are constructed once at startup from the
//! database handle and passed by reference; there is no ambient/global
//! registry to look things up in.

use bistro_db::Database;

use crate::services::{OrderService, ReportService, ReservationService};

/// Shared application state.
///
/// Cloning is cheap: every field is a thin wrapper around the connection
/// pool.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub reservations: ReservationService,
    pub orders: OrderService,
    pub reports: ReportService,
}

impl AppState {
    /// Builds the state and its services from a connected database.
    pub fn new(db: Database) -> Self {
        AppState {
            reservations: ReservationService::new(db.clone()),
            orders: OrderService::new(db.clone()),
            reports: ReportService::new(db.clone()),
            db,
        }
    }
}
