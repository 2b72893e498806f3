use crate::config::Config;
use crate::db::models::{NewPerson, Person};
use crate::error::HobbyistError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

/// Open the pool described by `cfg`, creating the database file if needed.
pub async fn connect(cfg: &Config) -> Result<SqlitePool, HobbyistError> {
    let options = SqliteConnectOptions::from_str(&cfg.database_url)?
        .create_if_missing(true)
        .busy_timeout(cfg.db_timeout());
    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.db_max_connections)
        .acquire_timeout(cfg.db_timeout())
        .connect_with(options)
        .await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct PeopleStorage {
    pool: SqlitePool,
}

impl PeopleStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Every row in the table, in SQLite's natural scan order.
    pub async fn list_all(&self) -> Result<Vec<Person>, HobbyistError> {
        let people = sqlx::query_as::<_, Person>("SELECT id, name, hobby FROM people")
            .fetch_all(&self.pool)
            .await?;
        debug!(count = people.len(), "listed people");
        Ok(people)
    }

    /// Insert one row. Returns the generated id.
    pub async fn insert(&self, person: &NewPerson) -> Result<i64, HobbyistError> {
        let result = sqlx::query("INSERT INTO people (name, hobby) VALUES (?, ?)")
            .bind(&person.name)
            .bind(&person.hobby)
            .execute(&self.pool)
            .await
            .map_err(HobbyistError::from_insert)?;
        Ok(result.last_insert_rowid())
    }
}

/// Single-connection in-memory pool; every connection to `sqlite::memory:`
/// is a separate database, so the pool must never open a second one.
#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory sqlite")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;

    async fn storage() -> PeopleStorage {
        let pool = memory_pool().await;
        schema::up(&pool).await.unwrap();
        PeopleStorage::new(pool)
    }

    fn person(name: &str, hobby: &str) -> NewPerson {
        NewPerson {
            name: name.to_string(),
            hobby: hobby.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_fresh_ids() {
        let storage = storage().await;
        let first = storage.insert(&person("Ada", "Climbing")).await.unwrap();
        let second = storage.insert(&person("Grace", "Sailing")).await.unwrap();
        assert!(second > first);

        let people = storage.list_all().await.unwrap();
        assert_eq!(people.len(), 2);
        assert!(people.contains(&Person {
            id: first,
            name: "Ada".to_string(),
            hobby: "Climbing".to_string(),
        }));
    }

    #[tokio::test]
    async fn duplicate_name_is_a_constraint_error() {
        let storage = storage().await;
        storage.insert(&person("Ada", "Climbing")).await.unwrap();

        let err = storage
            .insert(&person("Ada", "Chess"))
            .await
            .expect_err("second insert should fail");
        match err {
            HobbyistError::Constraint(detail) => assert!(detail.contains("people.name")),
            other => panic!("expected constraint error, got {other:?}"),
        }
        assert_eq!(storage.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn values_are_bound_not_interpolated() {
        let storage = storage().await;
        let hostile = "Robert'); DROP TABLE people;--";
        storage.insert(&person(hostile, "Tables")).await.unwrap();

        let people = storage.list_all().await.unwrap();
        assert_eq!(people[0].name, hostile);
    }

    #[tokio::test]
    async fn list_fails_without_table() {
        let storage = PeopleStorage::new(memory_pool().await);
        assert!(matches!(
            storage.list_all().await,
            Err(HobbyistError::Database(_))
        ));
    }
}
