//! # Service Layer
//!
//! Workflow orchestration between the HTTP handlers, the pure core rules
//! and the repositories.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Service Layer                                │
//! │                                                                     │
//! │  ┌─────────────────────┐  ┌────────────────┐  ┌─────────────────┐  │
//! │  │ ReservationService  │  │  OrderService  │  │  ReportService  │  │
//! │  │                     │  │                │  │                 │  │
//! │  │ • capacity rule     │  │ • stock check  │  │ • daily sales   │  │
//! │  │ • overlap check     │  │ • all-or-      │  │ • low stock     │  │
//! │  │   in one tx         │  │   nothing tx   │  │                 │  │
//! │  └─────────────────────┘  └────────────────┘  └─────────────────┘  │
//! │                                                                     │
//! │  Menu and table CRUD is plain data access; the handlers call the    │
//! │  repositories directly.                                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

pub mod order_service;
pub mod report_service;
pub mod reservation_service;

pub use order_service::{NewOrder, OrderLineInput, OrderService, OrderWithItems};
pub use report_service::{DailySalesReport, ReportService};
pub use reservation_service::{NewReservation, ReservationPatch, ReservationService};
