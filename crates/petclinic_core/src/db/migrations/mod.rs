//! Ordered schema scripts for the clinic database.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - All pending scripts run in one transaction; the applied version is
//!   mirrored to `PRAGMA user_version`.
//! - Every table listed in `REFERENCE_TABLES` has at least one row afterwards.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, Transaction};

struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: include_str!("0001_init.sql"),
    },
    Migration {
        version: 2,
        sql: include_str!("0002_pet_types.sql"),
    },
];

/// Lookup tables that pet hydration resolves against.
const REFERENCE_TABLES: &[&str] = &["types"];

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings the connection up to the latest schema version and checks that
/// reference data is present.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_version();

    match from_version {
        v if v > latest => {
            return Err(DbError::UnsupportedSchemaVersion {
                db_version: v,
                latest_supported: latest,
            });
        }
        v if v < latest => {
            let tx = conn.transaction()?;
            run_pending(&tx, from_version)?;
            tx.commit()?;
            info!("event=db_migrate module=db status=ok from_version={from_version} to_version={latest}");
        }
        _ => {}
    }

    ensure_reference_data(conn)
}

fn run_pending(tx: &Transaction<'_>, from_version: u32) -> DbResult<()> {
    for migration in MIGRATIONS.iter().filter(|m| m.version > from_version) {
        tx.execute_batch(migration.sql)?;
        tx.pragma_update(None, "user_version", migration.version)?;
    }
    Ok(())
}

fn ensure_reference_data(conn: &Connection) -> DbResult<()> {
    for &table in REFERENCE_TABLES {
        let has_rows: bool = conn.query_row(
            &format!("SELECT EXISTS(SELECT 1 FROM {table});"),
            [],
            |row| row.get(0),
        )?;
        if !has_rows {
            return Err(DbError::MissingReferenceData(table));
        }
    }
    Ok(())
}
