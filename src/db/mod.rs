//! Persistence helpers around the embedded SQLite database. Each submodule
//! owns one concern: `connection` opens the store and keeps the schema, while
//! `records` holds the queries. The optional-field shape of the table is
//! deliberate; see `models::PersistedRecord`.

mod connection;
mod records;

pub use connection::{ensure_schema, export_dir};
pub use records::{create_record, delete_record, fetch_all, load_or_seed_records, LoadedRecords};
