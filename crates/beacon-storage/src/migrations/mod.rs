//! Forward-only schema migrations tracked in `schema_version`.

mod v001_documents_chunks;
mod v002_chunk_fts;

use rusqlite::{params, Connection};
use tracing::info;

use beacon_core::errors::{BeaconResult, StorageError};

type Migration = fn(&Connection) -> rusqlite::Result<()>;

const MIGRATIONS: &[(u32, &str, Migration)] = &[
    (1, "documents_chunks", v001_documents_chunks::migrate),
    (2, "chunk_fts", v002_chunk_fts::migrate),
];

/// Latest schema version known to this build.
pub const LATEST_VERSION: u32 = 2;

/// Apply every migration newer than the recorded version, each in its own transaction.
pub fn run_migrations(conn: &Connection) -> BeaconResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| StorageError::MigrationFailed {
        version: 0,
        reason: e.to_string(),
    })?;

    let current = current_version(conn)?;
    for &(version, name, migrate) in MIGRATIONS {
        if version <= current {
            continue;
        }
        let fail = |e: rusqlite::Error| StorageError::MigrationFailed {
            version,
            reason: e.to_string(),
        };
        let tx = conn.unchecked_transaction().map_err(fail)?;
        migrate(&tx).map_err(fail)?;
        tx.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![version],
        )
        .map_err(fail)?;
        tx.commit().map_err(fail)?;
        info!(version, name, "applied migration");
    }
    current_version(conn)
}

pub fn current_version(conn: &Connection) -> BeaconResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| {
        StorageError::MigrationFailed {
            version: 0,
            reason: e.to_string(),
        }
        .into()
    })
}
