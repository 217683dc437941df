use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::Connection;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".bilingual-notebook";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "notebook.sqlite";
/// Subdirectory of the data directory where exported snapshots land.
const EXPORT_DIR_NAME: &str = "exports";

/// Ensure the database file exists, create the schema if needed, and return a
/// live connection. Every column except the key is nullable on purpose: the
/// persisted shape tolerates half-written rows, and `record::validate` is the
/// single place that decides whether a row is complete enough to show.
pub fn ensure_schema() -> Result<Connection> {
    let db_path = db_path()?;

    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(&db_path).context("failed to open SQLite database")?;
    create_tables(&conn)?;
    Ok(conn)
}

/// Shared between the on-disk database and the in-memory one the tests use.
pub(crate) fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS records (
            id TEXT PRIMARY KEY,
            title TEXT,
            link TEXT,
            original_text TEXT,
            translated_text TEXT,
            combined_text TEXT,
            created_at TEXT
        )",
        [],
    )
    .context("failed to create records table")?;

    Ok(())
}

/// Resolve the directory exported snapshot files are written into, creating
/// it on first use.
pub fn export_dir() -> Result<PathBuf> {
    let dir = data_dir()?.join(EXPORT_DIR_NAME);
    fs::create_dir_all(&dir).context("failed to create export directory")?;
    Ok(dir)
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(DB_FILE_NAME))
}

fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}
