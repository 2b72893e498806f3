//! Forward and backward DDL for the `people` table.
//!
//! `up` and `down` omit `IF [NOT] EXISTS`: creating a table that
//! already exists, or dropping one that does not, is an error.

use crate::db::sqlite::SqlitePool;
use crate::error::HobbyistError;
use tracing::info;

pub const PEOPLE_TABLE: &str = "people";

/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT, never reused
/// - `name` UNIQUE (creates an index implicitly)
/// - `hobby` plain text
pub const CREATE_PEOPLE: &str = r#"
CREATE TABLE people (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    hobby TEXT NOT NULL
)
"#;

pub const DROP_PEOPLE: &str = "DROP TABLE people";

/// Create the `people` table.
pub async fn up(pool: &SqlitePool) -> Result<(), HobbyistError> {
    sqlx::query(CREATE_PEOPLE).execute(pool).await?;
    info!(table = PEOPLE_TABLE, "table created");
    Ok(())
}

/// Drop the `people` table and every row in it.
pub async fn down(pool: &SqlitePool) -> Result<(), HobbyistError> {
    sqlx::query(DROP_PEOPLE).execute(pool).await?;
    info!(table = PEOPLE_TABLE, "table dropped");
    Ok(())
}

pub async fn table_exists(pool: &SqlitePool) -> Result<bool, HobbyistError> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(PEOPLE_TABLE)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

/// Run `up` unless the table is already there. Returns whether it was created.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<bool, HobbyistError> {
    if table_exists(pool).await? {
        return Ok(false);
    }
    up(pool).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::memory_pool;

    #[tokio::test]
    async fn up_then_down() {
        let pool = memory_pool().await;
        assert!(!table_exists(&pool).await.unwrap());

        up(&pool).await.unwrap();
        assert!(table_exists(&pool).await.unwrap());

        down(&pool).await.unwrap();
        assert!(!table_exists(&pool).await.unwrap());
    }

    #[tokio::test]
    async fn up_fails_when_table_exists() {
        let pool = memory_pool().await;
        up(&pool).await.unwrap();
        assert!(matches!(up(&pool).await, Err(HobbyistError::Database(_))));
    }

    #[tokio::test]
    async fn down_fails_when_table_missing() {
        let pool = memory_pool().await;
        assert!(matches!(down(&pool).await, Err(HobbyistError::Database(_))));
    }

    #[tokio::test]
    async fn ensure_schema_only_creates_once() {
        let pool = memory_pool().await;
        assert!(ensure_schema(&pool).await.unwrap());
        assert!(!ensure_schema(&pool).await.unwrap());
    }
}
