use sqlx::FromRow;

/// A stored row of the `people` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub hobby: String,
}

/// A validated submission ready to be inserted; `id` is assigned by SQLite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub hobby: String,
}
