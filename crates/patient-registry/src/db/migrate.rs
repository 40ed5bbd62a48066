//! Additive schema migration for the patients table.
//!
//! Runs once at store open, in order: table, then columns, then backfill.
//! Each step is idempotent, so re-running on an already-migrated database
//! is a no-op.

use std::collections::HashSet;

use rusqlite::Connection;
use tracing::info;

use super::{schema::SCHEMA, today_iso, StoreResult};

/// Run the full migration: table → columns → backfill.
pub(crate) fn run(conn: &Connection) -> StoreResult<()> {
    ensure_table(conn)?;
    ensure_migrated_columns(conn)?;
    backfill_date_of_entry(conn)?;
    Ok(())
}

/// Create the patients table if absent.
pub fn ensure_table(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Add the date columns if missing. Both are nullable at creation time;
/// `backfill_date_of_entry` closes the gap for `date_of_entry`.
pub fn ensure_migrated_columns(conn: &Connection) -> StoreResult<()> {
    let existing = existing_columns(conn)?;

    if !existing.contains("date_of_birth") {
        conn.execute("ALTER TABLE patients ADD COLUMN date_of_birth TEXT", [])?;
        info!(column = "date_of_birth", "added patients column");
    }
    if !existing.contains("date_of_entry") {
        // Dates are stored as ISO strings (YYYY-MM-DD)
        conn.execute("ALTER TABLE patients ADD COLUMN date_of_entry TEXT", [])?;
        info!(column = "date_of_entry", "added patients column");
    }
    Ok(())
}

/// Set `date_of_entry` to today's date on every row where it is null.
///
/// Backfilled rows get the migration's run date, not their true entry
/// date. That approximation is part of the contract: the historical value
/// was never recorded, and "unknown, default to today" is the accepted
/// reading.
pub fn backfill_date_of_entry(conn: &Connection) -> StoreResult<()> {
    let backfilled = conn.execute(
        "UPDATE patients SET date_of_entry = ?1 WHERE date_of_entry IS NULL",
        [today_iso()],
    )?;
    if backfilled > 0 {
        info!(rows = backfilled, "backfilled date_of_entry");
    }
    Ok(())
}

fn existing_columns(conn: &Connection) -> StoreResult<HashSet<String>> {
    let mut stmt = conn.prepare("PRAGMA table_info(patients)")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<HashSet<_>, _>>()?;
    Ok(columns)
}
