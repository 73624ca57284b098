//! PRAGMA configuration applied to every SQLite connection.

use rusqlite::Connection;

use beacon_core::errors::BeaconResult;

use crate::to_storage_err;

/// WAL, NORMAL sync, 64MB page cache, 5s busy timeout, foreign keys on.
pub fn apply_pragmas(conn: &Connection) -> BeaconResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = -64000;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Read connections skip journal settings; they cannot change them.
pub fn apply_read_pragmas(conn: &Connection) -> BeaconResult<()> {
    conn.execute_batch(
        "
        PRAGMA cache_size = -16000;
        PRAGMA busy_timeout = 5000;
        PRAGMA query_only = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn verify_wal_mode(conn: &Connection) -> BeaconResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
