//! SQLite connection bootstrap for the relational backend.
//!
//! # Responsibility
//! - Open file or in-memory connections with the schema applied.
//! - Configure connection pragmas required by core behavior.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`; child rows follow
//!   parent deletes via cascade.
//! - Schema application is idempotent; re-opening an existing database is
//!   safe.

use crate::storage::{StorageError, StorageResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const SCHEMA_SQL: &str = "\
CREATE TABLE IF NOT EXISTS resume (
    uuid      TEXT PRIMARY KEY NOT NULL,
    full_name TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS contact (
    resume_uuid TEXT NOT NULL REFERENCES resume (uuid) ON DELETE CASCADE,
    type        TEXT NOT NULL,
    value       TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS section (
    resume_uuid TEXT NOT NULL REFERENCES resume (uuid) ON DELETE CASCADE,
    type        TEXT NOT NULL,
    value       TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_contact_resume ON contact (resume_uuid);
CREATE INDEX IF NOT EXISTS idx_section_resume ON section (resume_uuid);
";

/// Opens a SQLite database file with the resume schema applied.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> StorageResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    let result = Connection::open(path)
        .map_err(config_failure)
        .and_then(|mut conn| {
            bootstrap_connection(&mut conn)?;
            Ok(conn)
        });

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode=file duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode=file duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

/// Opens an in-memory SQLite database with the resume schema applied.
pub fn open_db_in_memory() -> StorageResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let result = Connection::open_in_memory()
        .map_err(config_failure)
        .and_then(|mut conn| {
            bootstrap_connection(&mut conn)?;
            Ok(conn)
        });

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode=memory duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode=memory duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

fn bootstrap_connection(conn: &mut Connection) -> StorageResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(config_failure)?;
    conn.busy_timeout(Duration::from_secs(5))
        .map_err(config_failure)?;
    conn.execute_batch(SCHEMA_SQL).map_err(config_failure)?;
    Ok(())
}

fn config_failure(err: rusqlite::Error) -> StorageError {
    StorageError::Config(format!("database bootstrap failed: {err}"))
}
