//! # Availability Engine
//!
//! Pure interval math deciding whether a table is free for a requested
//! time window. No I/O: callers load the reservations, this module only
//! looks at them.
//!
//! ## The Overlap Test
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Two half-open windows [a1, a2) and [b1, b2) overlap iff            │
//! │                                                                     │
//! │        a1 < b2  AND  b1 < a2                                        │
//! │                                                                     │
//! │  Half-open means the end instant is NOT included, so back-to-back   │
//! │  bookings never falsely conflict:                                   │
//! │                                                                     │
//! │    existing  18:00 ─────────── 19:30                                │
//! │    request   ..........19:00 ─────── 20:00   ← overlap (rejected)   │
//! │    request   ...............19:30 ── 21:00   ← touching (accepted)  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only reservations with status `booked` are conflict sources. When
//! validating an update, the reservation being updated is excluded from
//! the conflict set (a window always "overlaps" itself).

use chrono::{DateTime, Duration, Utc};

use crate::error::ValidationError;
use crate::types::{Reservation, ReservationStatus, Table};

// =============================================================================
// Time Window
// =============================================================================

/// A half-open time window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Builds a window from a start instant and a duration in minutes.
    ///
    /// Rejects non-positive durations; a zero-length window would make
    /// every availability check trivially pass.
    pub fn new(start: DateTime<Utc>, duration_minutes: i64) -> Result<Self, ValidationError> {
        if duration_minutes <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "duration_minutes".to_string(),
            });
        }

        Ok(TimeWindow {
            start,
            end: start + Duration::minutes(duration_minutes),
        })
    }

    /// The window an existing reservation occupies.
    ///
    /// Persisted reservations always carry a positive duration (enforced at
    /// write time), so this cannot fail.
    pub fn of_reservation(reservation: &Reservation) -> Self {
        TimeWindow {
            start: reservation.reserved_for,
            end: reservation.reserved_until(),
        }
    }

    #[inline]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// The single overlap test: `a1 < b2 && b1 < a2`.
    #[inline]
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

// =============================================================================
// Conflict Checks
// =============================================================================

/// Checks whether `window` is free of conflicts against a set of existing
/// reservations for one table.
///
/// ## Rules
/// - Only `booked` reservations block; cancelled/completed never do.
/// - `exclude_id` removes one reservation from the conflict set - pass the
///   reservation's own id when validating an update.
///
/// The caller is expected to pass reservations belonging to a single table;
/// reservations for other tables in the slice would block incorrectly.
pub fn window_is_free(
    window: &TimeWindow,
    reservations: &[Reservation],
    exclude_id: Option<&str>,
) -> bool {
    reservations
        .iter()
        .filter(|r| r.status == ReservationStatus::Booked)
        .filter(|r| exclude_id != Some(r.id.as_str()))
        .all(|r| !window.overlaps(&TimeWindow::of_reservation(r)))
}

/// Returns the tables that can seat a party for the requested window.
///
/// A table qualifies when it is active, seats at least `party_size`, and
/// has no conflicting booked reservation. `booked` may contain reservations
/// for many tables; they are matched by `table_id`.
///
/// Output preserves the input table order; callers must not rely on any
/// particular ordering beyond that.
pub fn filter_available(
    tables: &[Table],
    booked: &[Reservation],
    window: &TimeWindow,
    party_size: i64,
) -> Vec<Table> {
    tables
        .iter()
        .filter(|t| t.is_active && t.capacity >= party_size)
        .filter(|t| {
            booked
                .iter()
                .filter(|r| r.table_id == t.id && r.status == ReservationStatus::Booked)
                .all(|r| !window.overlaps(&TimeWindow::of_reservation(r)))
        })
        .cloned()
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, minute, 0).unwrap()
    }

    fn booked(id: &str, table_id: &str, start: DateTime<Utc>, minutes: i64) -> Reservation {
        Reservation {
            id: id.to_string(),
            table_id: table_id.to_string(),
            customer_name: "Ada".to_string(),
            customer_phone: String::new(),
            party_size: 2,
            reserved_for: start,
            duration_minutes: minutes,
            status: ReservationStatus::Booked,
            notes: String::new(),
            created_at: start,
            updated_at: start,
        }
    }

    fn table(id: &str, number: i64, capacity: i64, is_active: bool) -> Table {
        let now = at(12, 0);
        Table {
            id: id.to_string(),
            number,
            capacity,
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_window_rejects_non_positive_duration() {
        assert!(TimeWindow::new(at(18, 0), 0).is_err());
        assert!(TimeWindow::new(at(18, 0), -90).is_err());
        assert!(TimeWindow::new(at(18, 0), 90).is_ok());
    }

    #[test]
    fn test_overlap_inside_existing_window() {
        // Existing 18:00-19:30, request 19:00-20:00: 19:00 < 19:30 → overlap
        let existing = vec![booked("r1", "t1", at(18, 0), 90)];
        let request = TimeWindow::new(at(19, 0), 60).unwrap();
        assert!(!window_is_free(&request, &existing, None));
    }

    #[test]
    fn test_touching_endpoints_do_not_overlap() {
        // Existing 18:00-19:30, request 19:30-21:00: half-open, no conflict
        let existing = vec![booked("r1", "t1", at(18, 0), 90)];
        let request = TimeWindow::new(at(19, 30), 90).unwrap();
        assert!(window_is_free(&request, &existing, None));

        // And the mirror image: request ending exactly at the existing start
        let request = TimeWindow::new(at(17, 0), 60).unwrap();
        assert!(window_is_free(&request, &existing, None));
    }

    #[test]
    fn test_request_enclosing_existing_window_conflicts() {
        let existing = vec![booked("r1", "t1", at(18, 0), 60)];
        let request = TimeWindow::new(at(17, 0), 180).unwrap();
        assert!(!window_is_free(&request, &existing, None));
    }

    #[test]
    fn test_cancelled_and_completed_never_block() {
        let mut cancelled = booked("r1", "t1", at(18, 0), 90);
        cancelled.status = ReservationStatus::Cancelled;
        let mut completed = booked("r2", "t1", at(18, 0), 90);
        completed.status = ReservationStatus::Completed;

        let request = TimeWindow::new(at(18, 30), 60).unwrap();
        assert!(window_is_free(&request, &[cancelled, completed], None));
    }

    #[test]
    fn test_update_excludes_own_reservation() {
        let existing = vec![booked("r1", "t1", at(18, 0), 90)];
        // Shifting r1 by 30 minutes overlaps only itself
        let request = TimeWindow::new(at(18, 30), 90).unwrap();

        assert!(!window_is_free(&request, &existing, None));
        assert!(window_is_free(&request, &existing, Some("r1")));
        // Excluding some other id changes nothing
        assert!(!window_is_free(&request, &existing, Some("r2")));
    }

    #[test]
    fn test_filter_available_applies_all_three_rules() {
        let tables = vec![
            table("t1", 1, 4, true),  // conflicting reservation
            table("t2", 2, 2, true),  // too small
            table("t3", 3, 6, false), // inactive
            table("t4", 4, 4, true),  // free
        ];
        let booked_list = vec![
            booked("r1", "t1", at(18, 0), 90),
            // Cancelled on t4 must not block it
            {
                let mut r = booked("r2", "t4", at(18, 0), 90);
                r.status = ReservationStatus::Cancelled;
                r
            },
        ];

        let window = TimeWindow::new(at(18, 30), 60).unwrap();
        let available = filter_available(&tables, &booked_list, &window, 3);

        let numbers: Vec<i64> = available.iter().map(|t| t.number).collect();
        assert_eq!(numbers, vec![4]);
    }

    #[test]
    fn test_filter_available_matches_reservations_by_table() {
        let tables = vec![table("t1", 1, 4, true), table("t2", 2, 4, true)];
        // Booking on t1 must not block t2
        let booked_list = vec![booked("r1", "t1", at(18, 0), 90)];

        let window = TimeWindow::new(at(18, 0), 90).unwrap();
        let available = filter_available(&tables, &booked_list, &window, 2);

        let numbers: Vec<i64> = available.iter().map(|t| t.number).collect();
        assert_eq!(numbers, vec![2]);
    }
}
