//! Ledger schema steps.
//!
//! The schema version lives in `PRAGMA user_version`; step `n` brings a file
//! from version `n - 1` to `n`. Steps are append-only and never edited once
//! released.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// `(version, sql)` pairs in ascending version order.
const LEDGER_STEPS: &[(u32, &str)] = &[(1, include_str!("0001_ledger.sql"))];

/// Ledger schema version this build writes.
pub fn latest_version() -> u32 {
    LEDGER_STEPS.last().map_or(0, |(version, _)| *version)
}

/// Reads the ledger schema version stamped on `conn`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Brings `conn` up to `latest_version`.
///
/// All missing steps run in one transaction, so a failure leaves the file at
/// its previous version. Files stamped with a later version are refused
/// instead of being touched.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let known = latest_version();
    if found > known {
        return Err(DbError::SchemaTooNew { found, known });
    }
    if found == known {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in LEDGER_STEPS.iter().filter(|(version, _)| *version > found) {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={found} to_version={known}");
    Ok(())
}
