//! # Table Repository
//!
//! Database operations for floor tables.
//!
//! Deletion rules: removing a table cascades to its reservations and clears
//! the `table_id` reference on historical orders (they keep their totals).

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use bistro_core::Table;

const TABLE_COLUMNS: &str = "id, number, capacity, is_active, created_at, updated_at";

/// Repository for table database operations.
#[derive(Debug, Clone)]
pub struct TableRepository {
    pool: SqlitePool,
}

impl TableRepository {
    /// Creates a new TableRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TableRepository { pool }
    }

    /// Lists all tables ordered by floor number.
    pub async fn list(&self) -> DbResult<Vec<Table>> {
        let tables = sqlx::query_as::<_, Table>(&format!(
            "SELECT {TABLE_COLUMNS} FROM tables ORDER BY number"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(tables)
    }

    /// Lists active tables ordered by floor number.
    ///
    /// The availability engine applies the capacity and overlap filters on
    /// top of this set.
    pub async fn list_active(&self) -> DbResult<Vec<Table>> {
        let tables = sqlx::query_as::<_, Table>(&format!(
            "SELECT {TABLE_COLUMNS} FROM tables WHERE is_active = 1 ORDER BY number"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(tables)
    }

    /// Gets a table by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Table>> {
        let table = sqlx::query_as::<_, Table>(&format!(
            "SELECT {TABLE_COLUMNS} FROM tables WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(table)
    }

    /// Inserts a new table.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - floor number already exists
    pub async fn insert(&self, table: &Table) -> DbResult<Table> {
        debug!(number = %table.number, "Inserting table");

        sqlx::query(
            r#"
            INSERT INTO tables (id, number, capacity, is_active, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&table.id)
        .bind(table.number)
        .bind(table.capacity)
        .bind(table.is_active)
        .bind(table.created_at)
        .bind(table.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(table.clone())
    }

    /// Updates an existing table.
    pub async fn update(&self, table: &Table) -> DbResult<()> {
        debug!(id = %table.id, "Updating table");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE tables SET
                number = ?2,
                capacity = ?3,
                is_active = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&table.id)
        .bind(table.number)
        .bind(table.capacity)
        .bind(table.is_active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Table", &table.id));
        }

        Ok(())
    }

    /// Deletes a table (reservations cascade, order references go NULL).
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting table");

        let result = sqlx::query("DELETE FROM tables WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Table", id));
        }

        Ok(())
    }
}

/// Helper to generate a new table ID.
pub fn generate_table_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn table(number: i64, capacity: i64) -> Table {
        let now = Utc::now();
        Table {
            id: generate_table_id(),
            number,
            capacity,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_list_ordering() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.tables();

        repo.insert(&table(3, 2)).await.unwrap();
        repo.insert(&table(1, 4)).await.unwrap();

        let numbers: Vec<i64> = repo.list().await.unwrap().iter().map(|t| t.number).collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_duplicate_number_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.tables();

        repo.insert(&table(1, 4)).await.unwrap();
        let err = repo.insert(&table(1, 6)).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_list_active_skips_inactive() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.tables();

        let mut inactive = table(2, 4);
        inactive.is_active = false;
        repo.insert(&table(1, 4)).await.unwrap();
        repo.insert(&inactive).await.unwrap();

        let numbers: Vec<i64> = repo
            .list_active()
            .await
            .unwrap()
            .iter()
            .map(|t| t.number)
            .collect();
        assert_eq!(numbers, vec![1]);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db.tables().delete("nope").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
