//! v001: documents and chunks.

use rusqlite::Connection;

pub fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS documents (
            doc_id        INTEGER PRIMARY KEY AUTOINCREMENT,
            source_url    TEXT NOT NULL UNIQUE,
            title         TEXT NOT NULL DEFAULT '',
            content_hash  TEXT NOT NULL,
            fetched_at    TEXT NOT NULL,
            meta          TEXT NOT NULL DEFAULT '{}',
            updated_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS chunks (
            chunk_id         TEXT PRIMARY KEY,
            doc_id           INTEGER NOT NULL,
            chunk_index      INTEGER NOT NULL,
            text             TEXT NOT NULL,
            token_count      INTEGER NOT NULL,
            heading_path     TEXT NOT NULL DEFAULT '[]',
            tags             TEXT NOT NULL DEFAULT '[]',
            campus           TEXT,
            building         TEXT,
            department       TEXT,
            lab              TEXT,
            professor        TEXT NOT NULL DEFAULT '[]',
            source_url       TEXT NOT NULL,
            embedding        BLOB NOT NULL,
            embedding_model  TEXT NOT NULL,
            embedding_dim    INTEGER NOT NULL,
            FOREIGN KEY (doc_id) REFERENCES documents(doc_id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_chunks_doc ON chunks(doc_id, chunk_index);
        CREATE INDEX IF NOT EXISTS idx_chunks_campus ON chunks(campus);
        CREATE INDEX IF NOT EXISTS idx_chunks_department ON chunks(department);
        CREATE INDEX IF NOT EXISTS idx_chunks_lab ON chunks(lab);
        CREATE INDEX IF NOT EXISTS idx_chunks_dim ON chunks(embedding_dim);
        ",
    )
}
