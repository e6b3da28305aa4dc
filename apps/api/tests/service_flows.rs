//! End-to-end service flows against an in-memory database.
//!
//! These exercise the same state and services the HTTP handlers use, with
//! the full migration-applied schema underneath.

use chrono::{DateTime, TimeZone, Utc};

use bistro_api::error::ErrorCode;
use bistro_api::services::{NewOrder, NewReservation, OrderLineInput, ReservationPatch};
use bistro_api::state::AppState;
use bistro_core::{MenuItem, OrderStatus, Table};
use bistro_db::repository::menu::generate_menu_item_id;
use bistro_db::repository::table::generate_table_id;
use bistro_db::{Database, DbConfig, DbError};

async fn test_state() -> AppState {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    AppState::new(db)
}

async fn seed_table(state: &AppState, number: i64, capacity: i64) -> Table {
    let now = Utc::now();
    let table = Table {
        id: generate_table_id(),
        number,
        capacity,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    state.db.tables().insert(&table).await.unwrap();
    table
}

async fn seed_menu_item(state: &AppState, name: &str, price_cents: i64, stock: i64) -> MenuItem {
    let now = Utc::now();
    let item = MenuItem {
        id: generate_menu_item_id(),
        name: name.to_string(),
        description: String::new(),
        price_cents,
        inventory_count: stock,
        is_active: true,
        low_stock_threshold: 5,
        created_at: now,
        updated_at: now,
    };
    state.db.menu().insert(&item).await.unwrap();
    item
}

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, hour, minute, 0).unwrap()
}

fn reservation_input(table_id: &str, start: DateTime<Utc>, minutes: i64) -> NewReservation {
    NewReservation {
        table_id: table_id.to_string(),
        customer_name: "Ada".to_string(),
        customer_phone: String::new(),
        party_size: 2,
        reserved_for: start,
        duration_minutes: minutes,
        notes: String::new(),
    }
}

// =============================================================================
// Reservations
// =============================================================================

#[tokio::test]
async fn overlapping_booking_is_rejected_touching_is_accepted() {
    let state = test_state().await;
    let table = seed_table(&state, 1, 4).await;

    // 18:00-19:30
    state
        .reservations
        .create(reservation_input(&table.id, at(18, 0), 90))
        .await
        .unwrap();

    // 19:00-20:00 overlaps (19:00 < 19:30)
    let err = state
        .reservations
        .create(reservation_input(&table.id, at(19, 0), 60))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Conflict);

    // 19:30-21:00 touches the boundary: allowed
    state
        .reservations
        .create(reservation_input(&table.id, at(19, 30), 90))
        .await
        .unwrap();
}

#[tokio::test]
async fn cancelled_reservation_does_not_block() {
    let state = test_state().await;
    let table = seed_table(&state, 1, 4).await;

    let reservation = state
        .reservations
        .create(reservation_input(&table.id, at(18, 0), 90))
        .await
        .unwrap();
    // Cancel directly in the store (status is read-only through the API)
    sqlx::query("UPDATE reservations SET status = 'cancelled' WHERE id = ?1")
        .bind(&reservation.id)
        .execute(state.db.pool())
        .await
        .unwrap();

    state
        .reservations
        .create(reservation_input(&table.id, at(18, 30), 60))
        .await
        .unwrap();
}

#[tokio::test]
async fn party_larger_than_capacity_is_rejected_regardless_of_window() {
    let state = test_state().await;
    let table = seed_table(&state, 1, 4).await;

    let mut input = reservation_input(&table.id, at(18, 0), 90);
    input.party_size = 5;

    let err = state.reservations.create(input).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    assert!(err.message.contains("capacity"));
}

#[tokio::test]
async fn update_excludes_own_window_from_conflicts() {
    let state = test_state().await;
    let table = seed_table(&state, 1, 4).await;

    let reservation = state
        .reservations
        .create(reservation_input(&table.id, at(18, 0), 90))
        .await
        .unwrap();

    // Shift by 30 minutes: overlaps only itself, must succeed
    let updated = state
        .reservations
        .update(
            &reservation.id,
            ReservationPatch {
                reserved_for: Some(at(18, 30)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.reserved_for, at(18, 30));

    // A second booking cannot move onto the first
    let other = state
        .reservations
        .create(reservation_input(&table.id, at(21, 0), 60))
        .await
        .unwrap();
    let err = state
        .reservations
        .update(
            &other.id,
            ReservationPatch {
                reserved_for: Some(at(19, 0)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Conflict);
}

#[tokio::test]
async fn availability_filters_capacity_activity_and_conflicts() {
    let state = test_state().await;
    let small = seed_table(&state, 1, 2).await;
    let free = seed_table(&state, 2, 4).await;
    let busy = seed_table(&state, 3, 4).await;

    state
        .reservations
        .create(reservation_input(&busy.id, at(18, 0), 90))
        .await
        .unwrap();

    let available = state
        .reservations
        .available_tables(at(18, 30), 60, 3)
        .await
        .unwrap();

    let ids: Vec<&str> = available.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec![free.id.as_str()]);
    assert!(!ids.contains(&small.id.as_str()));

    // Back-to-back after the busy table's window frees everything
    let available = state
        .reservations
        .available_tables(at(19, 30), 60, 3)
        .await
        .unwrap();
    assert_eq!(available.len(), 2);
}

// =============================================================================
// Orders
// =============================================================================

#[tokio::test]
async fn create_order_computes_total_and_deducts_stock() {
    let state = test_state().await;
    let table = seed_table(&state, 1, 4).await;
    let pizza = seed_menu_item(&state, "Margherita", 1250, 10).await;
    let wine = seed_menu_item(&state, "House Red", 550, 20).await;

    let order = state
        .orders
        .create_order(NewOrder {
            table_id: Some(table.id.clone()),
            reservation_id: None,
            lines: vec![
                OrderLineInput {
                    menu_item_id: pizza.id.clone(),
                    quantity: 2,
                },
                OrderLineInput {
                    menu_item_id: wine.id.clone(),
                    quantity: 3,
                },
            ],
        })
        .await
        .unwrap();

    // total == Σ unit_price × quantity
    assert_eq!(order.order.total_cents, 2 * 1250 + 3 * 550);
    assert_eq!(order.order.status, OrderStatus::Open);
    assert_eq!(order.items.len(), 2);

    let pizza_after = state.db.menu().get_by_id(&pizza.id).await.unwrap().unwrap();
    assert_eq!(pizza_after.inventory_count, 8);
    let wine_after = state.db.menu().get_by_id(&wine.id).await.unwrap().unwrap();
    assert_eq!(wine_after.inventory_count, 17);
}

#[tokio::test]
async fn unit_price_is_a_snapshot_not_the_live_price() {
    let state = test_state().await;
    let table = seed_table(&state, 1, 4).await;
    let mut pizza = seed_menu_item(&state, "Margherita", 1250, 10).await;

    let order = state
        .orders
        .create_order(NewOrder {
            table_id: Some(table.id.clone()),
            reservation_id: None,
            lines: vec![OrderLineInput {
                menu_item_id: pizza.id.clone(),
                quantity: 1,
            }],
        })
        .await
        .unwrap();

    // Raise the menu price afterwards
    pizza.price_cents = 1450;
    state.db.menu().update(&pizza).await.unwrap();

    let reloaded = state.orders.get(&order.order.id).await.unwrap();
    assert_eq!(reloaded.items[0].unit_price_cents, 1250);
    assert_eq!(reloaded.order.total_cents, 1250);
}

#[tokio::test]
async fn insufficient_stock_fails_without_side_effects() {
    let state = test_state().await;
    let table = seed_table(&state, 1, 4).await;
    let item = seed_menu_item(&state, "Tiramisu", 700, 2).await;

    let err = state
        .orders
        .create_order(NewOrder {
            table_id: Some(table.id.clone()),
            reservation_id: None,
            lines: vec![OrderLineInput {
                menu_item_id: item.id.clone(),
                quantity: 3,
            }],
        })
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InsufficientStock);
    assert!(err.message.contains("Tiramisu"));

    // Stock untouched, no order rows anywhere
    let after = state.db.menu().get_by_id(&item.id).await.unwrap().unwrap();
    assert_eq!(after.inventory_count, 2);
    assert!(state.orders.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn partial_stock_failure_deducts_from_neither_item() {
    let state = test_state().await;
    let table = seed_table(&state, 1, 4).await;
    let plenty = seed_menu_item(&state, "Espresso", 250, 50).await;
    let scarce = seed_menu_item(&state, "Panna Cotta", 650, 1).await;

    let err = state
        .orders
        .create_order(NewOrder {
            table_id: Some(table.id.clone()),
            reservation_id: None,
            lines: vec![
                OrderLineInput {
                    menu_item_id: plenty.id.clone(),
                    quantity: 2,
                },
                OrderLineInput {
                    menu_item_id: scarce.id.clone(),
                    quantity: 2,
                },
            ],
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InsufficientStock);

    let plenty_after = state.db.menu().get_by_id(&plenty.id).await.unwrap().unwrap();
    assert_eq!(plenty_after.inventory_count, 50);
    let scarce_after = state.db.menu().get_by_id(&scarce.id).await.unwrap().unwrap();
    assert_eq!(scarce_after.inventory_count, 1);
    assert!(state.orders.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn order_requires_a_table_or_reservation_and_items() {
    let state = test_state().await;
    let table = seed_table(&state, 1, 4).await;
    let item = seed_menu_item(&state, "Espresso", 250, 10).await;

    let err = state
        .orders
        .create_order(NewOrder {
            table_id: None,
            reservation_id: None,
            lines: vec![OrderLineInput {
                menu_item_id: item.id.clone(),
                quantity: 1,
            }],
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    let err = state
        .orders
        .create_order(NewOrder {
            table_id: Some(table.id.clone()),
            reservation_id: None,
            lines: vec![],
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    let err = state
        .orders
        .create_order(NewOrder {
            table_id: Some("missing".to_string()),
            reservation_id: None,
            lines: vec![OrderLineInput {
                menu_item_id: item.id.clone(),
                quantity: 1,
            }],
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn inactive_menu_item_is_not_orderable() {
    let state = test_state().await;
    let table = seed_table(&state, 1, 4).await;
    let mut item = seed_menu_item(&state, "Seasonal Special", 999, 10).await;
    item.is_active = false;
    state.db.menu().update(&item).await.unwrap();

    let err = state
        .orders
        .create_order(NewOrder {
            table_id: Some(table.id.clone()),
            reservation_id: None,
            lines: vec![OrderLineInput {
                menu_item_id: item.id.clone(),
                quantity: 1,
            }],
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn status_machine_is_guarded_and_cancel_does_not_restock() {
    let state = test_state().await;
    let table = seed_table(&state, 1, 4).await;
    let item = seed_menu_item(&state, "Lasagne", 1400, 10).await;

    let order = state
        .orders
        .create_order(NewOrder {
            table_id: Some(table.id.clone()),
            reservation_id: None,
            lines: vec![OrderLineInput {
                menu_item_id: item.id.clone(),
                quantity: 2,
            }],
        })
        .await
        .unwrap();

    let paid = state
        .orders
        .update_status(&order.order.id, OrderStatus::Paid)
        .await
        .unwrap();
    assert_eq!(paid.order.status, OrderStatus::Paid);

    // Terminal: neither re-pay nor cancel
    let err = state
        .orders
        .update_status(&order.order.id, OrderStatus::Paid)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    let err = state
        .orders
        .update_status(&order.order.id, OrderStatus::Cancelled)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    // A cancelled order keeps its stock deduction
    let second = state
        .orders
        .create_order(NewOrder {
            table_id: Some(table.id.clone()),
            reservation_id: None,
            lines: vec![OrderLineInput {
                menu_item_id: item.id.clone(),
                quantity: 1,
            }],
        })
        .await
        .unwrap();
    state
        .orders
        .update_status(&second.order.id, OrderStatus::Cancelled)
        .await
        .unwrap();

    let after = state.db.menu().get_by_id(&item.id).await.unwrap().unwrap();
    assert_eq!(after.inventory_count, 7); // 10 - 2 - 1, nothing restored
}

#[tokio::test]
async fn deleting_reservation_clears_order_reference() {
    let state = test_state().await;
    let table = seed_table(&state, 1, 4).await;
    let item = seed_menu_item(&state, "Espresso", 250, 10).await;

    let reservation = state
        .reservations
        .create(reservation_input(&table.id, at(18, 0), 90))
        .await
        .unwrap();

    let order = state
        .orders
        .create_order(NewOrder {
            table_id: None,
            reservation_id: Some(reservation.id.clone()),
            lines: vec![OrderLineInput {
                menu_item_id: item.id.clone(),
                quantity: 1,
            }],
        })
        .await
        .unwrap();

    state.reservations.delete(&reservation.id).await.unwrap();

    // Order survives with a NULL reference
    let reloaded = state.orders.get(&order.order.id).await.unwrap();
    assert_eq!(reloaded.order.reservation_id, None);
    assert_eq!(reloaded.order.total_cents, 250);
}

#[tokio::test]
async fn referenced_menu_item_cannot_be_deleted() {
    let state = test_state().await;
    let table = seed_table(&state, 1, 4).await;
    let item = seed_menu_item(&state, "Espresso", 250, 10).await;

    state
        .orders
        .create_order(NewOrder {
            table_id: Some(table.id.clone()),
            reservation_id: None,
            lines: vec![OrderLineInput {
                menu_item_id: item.id.clone(),
                quantity: 1,
            }],
        })
        .await
        .unwrap();

    let err = state.db.menu().delete(&item.id).await.unwrap_err();
    assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
}

// =============================================================================
// Reports
// =============================================================================

#[tokio::test]
async fn daily_sales_counts_only_paid_orders() {
    let state = test_state().await;
    let table = seed_table(&state, 1, 4).await;
    let item = seed_menu_item(&state, "Set Menu", 4250, 10).await;
    let dessert = seed_menu_item(&state, "Tiramisu", 10000, 10).await;

    let paid = state
        .orders
        .create_order(NewOrder {
            table_id: Some(table.id.clone()),
            reservation_id: None,
            lines: vec![OrderLineInput {
                menu_item_id: item.id.clone(),
                quantity: 1,
            }],
        })
        .await
        .unwrap();
    state
        .orders
        .update_status(&paid.order.id, OrderStatus::Paid)
        .await
        .unwrap();

    let cancelled = state
        .orders
        .create_order(NewOrder {
            table_id: Some(table.id.clone()),
            reservation_id: None,
            lines: vec![OrderLineInput {
                menu_item_id: dessert.id.clone(),
                quantity: 1,
            }],
        })
        .await
        .unwrap();
    state
        .orders
        .update_status(&cancelled.order.id, OrderStatus::Cancelled)
        .await
        .unwrap();

    // Both orders were created just now, so they fall on today's report
    let report = state.reports.daily_sales(None).await.unwrap();
    assert_eq!(report.orders, 1);
    assert_eq!(report.total_sales.to_decimal_string(), "42.50");
}

#[tokio::test]
async fn low_stock_report_respects_thresholds() {
    let state = test_state().await;

    let low = seed_menu_item(&state, "Low", 100, 3).await; // 3 <= 5
    seed_menu_item(&state, "Plenty", 100, 10).await; // 10 > 5

    let report = state.reports.low_stock().await.unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].id, low.id);
}
