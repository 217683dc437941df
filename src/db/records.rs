use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::catalog;
use crate::models::{PersistedRecord, ViewRecord};
use crate::record::validate;

/// What `load_or_seed_records` hands to the UI: the displayable records plus
/// a count of rows that failed validation, so the footer can mention them
/// without the listing falling over.
pub struct LoadedRecords {
    pub records: Vec<ViewRecord>,
    pub skipped: usize,
}

/// Load every displayable record, seeding the bundled catalog first if the
/// table is empty. Incomplete rows are skipped, not fatal; they stay in the
/// database untouched in case a future import path wants to repair them.
pub fn load_or_seed_records(conn: &Connection) -> Result<LoadedRecords> {
    if count_records(conn)? == 0 {
        let seeds = catalog::built_in_records()
            .map_err(|err| anyhow!("bundled snapshot is invalid: {err}"))?;
        for record in &seeds {
            create_record(conn, record)?;
        }
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in fetch_all(conn)? {
        match validate(row) {
            Ok(record) => records.push(record),
            Err(_) => skipped += 1,
        }
    }

    Ok(LoadedRecords { records, skipped })
}

/// Read every row in creation order, newest first. Fields come back as
/// options straight from the nullable columns; completeness is the caller's
/// question, not this query's.
pub fn fetch_all(conn: &Connection) -> Result<Vec<PersistedRecord>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, title, link, original_text, translated_text, combined_text, created_at
             FROM records
             ORDER BY created_at DESC, id",
        )
        .context("failed to prepare records query")?;

    let records = stmt
        .query_map([], |row| {
            let created_at: Option<String> = row.get(6)?;
            Ok(PersistedRecord {
                id: row.get(0)?,
                title: row.get(1)?,
                link: row.get(2)?,
                original_text: row.get(3)?,
                translated_text: row.get(4)?,
                combined_text: row.get(5)?,
                created_at: created_at.as_deref().and_then(parse_timestamp),
            })
        })
        .context("failed to iterate records")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect records")?;

    Ok(records)
}

/// Insert a fully-materialized record. Only validated records come through
/// here, so every column is written; incomplete rows can only enter the
/// database through other import paths.
pub fn create_record(conn: &Connection, record: &ViewRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO records
            (id, title, link, original_text, translated_text, combined_text, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            record.id,
            record.title,
            record.link,
            record.original_text,
            record.translated_text,
            record.combined_text,
            record.created_at.to_rfc3339(),
        ],
    )
    .context("failed to insert record")?;

    Ok(())
}

/// Remove a record row. Surfacing "not found" keeps the UI honest when its
/// in-memory list drifts from the table.
pub fn delete_record(conn: &Connection, id: &str) -> Result<()> {
    let deleted = conn
        .execute("DELETE FROM records WHERE id = ?1", params![id])
        .context("failed to delete record")?;

    if deleted == 0 {
        Err(anyhow!("Record not found"))
    } else {
        Ok(())
    }
}

fn count_records(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))
        .context("failed to count records")
}

/// Stored timestamps are RFC 3339 text. Anything unparseable is treated as an
/// absent timestamp, which in turn marks the row incomplete.
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
