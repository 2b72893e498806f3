//! Database module: the `people` table, its rows, and the pooled handle used
//! by the request handlers.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: forward/backward DDL for the `people` table
//! - `sqlite.rs`: pool construction and `PeopleStorage`

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{NewPerson, Person};
pub use sqlite::{PeopleStorage, SqlitePool, connect};
