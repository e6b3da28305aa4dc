//! # Report Service
//!
//! Read-only aggregations: daily sales and low stock.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use bistro_core::{MenuItem, Money};
use bistro_db::Database;

use crate::error::{ApiError, ApiResult};

/// Daily sales summary: PAID orders only.
#[derive(Debug, Clone)]
pub struct DailySalesReport {
    pub date: NaiveDate,
    pub orders: i64,
    pub total_sales: Money,
}

/// Service for reporting queries.
#[derive(Clone)]
pub struct ReportService {
    db: Database,
}

impl ReportService {
    pub fn new(db: Database) -> Self {
        ReportService { db }
    }

    /// Count and sum of PAID orders created on the given server-local
    /// calendar day (today when absent). Days are half-open:
    /// `[00:00, next day 00:00)`.
    pub async fn daily_sales(&self, date: Option<NaiveDate>) -> ApiResult<DailySalesReport> {
        let day = date.unwrap_or_else(|| Local::now().date_naive());

        let (start, end) = local_day_bounds(day)
            .ok_or_else(|| ApiError::validation(format!("Invalid date: {}", day)))?;

        let (orders, total_cents) = self.db.orders().daily_sales(start, end).await?;

        Ok(DailySalesReport {
            date: day,
            orders,
            total_sales: Money::from_cents(total_cents),
        })
    }

    /// Menu items at or below their low-stock threshold, lowest stock
    /// first.
    pub async fn low_stock(&self) -> ApiResult<Vec<MenuItem>> {
        Ok(self.db.menu().low_stock().await?)
    }
}

/// UTC bounds of a server-local calendar day.
///
/// `earliest()` resolves DST ambiguity; `None` only for dates that do not
/// exist in the local calendar (skipped by a DST gap at midnight).
fn local_day_bounds(day: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = Local
        .from_local_datetime(&day.and_hms_opt(0, 0, 0)?)
        .earliest()?;
    let end = Local
        .from_local_datetime(&day.succ_opt()?.and_hms_opt(0, 0, 0)?)
        .earliest()?;

    Some((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_local_day_bounds_span_24_hours() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let (start, end) = local_day_bounds(day).unwrap();
        // 23, 24 or 25 hours depending on DST; never zero or negative
        let span = end - start;
        assert!(span >= Duration::hours(23) && span <= Duration::hours(25));
    }
}
