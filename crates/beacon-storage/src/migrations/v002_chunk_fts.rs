//! v002: FTS5 index over chunk text and heading path, with sync triggers.

use rusqlite::Connection;

pub fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE VIRTUAL TABLE IF NOT EXISTS chunk_fts USING fts5(
            text,
            heading_path,
            content='chunks',
            content_rowid='rowid',
            tokenize='unicode61 remove_diacritics 2'
        );

        CREATE TRIGGER IF NOT EXISTS chunk_fts_insert AFTER INSERT ON chunks BEGIN
            INSERT INTO chunk_fts(rowid, text, heading_path)
            VALUES (new.rowid, new.text, new.heading_path);
        END;

        CREATE TRIGGER IF NOT EXISTS chunk_fts_delete BEFORE DELETE ON chunks BEGIN
            INSERT INTO chunk_fts(chunk_fts, rowid, text, heading_path)
            VALUES ('delete', old.rowid, old.text, old.heading_path);
        END;

        CREATE TRIGGER IF NOT EXISTS chunk_fts_update AFTER UPDATE OF text, heading_path ON chunks BEGIN
            INSERT INTO chunk_fts(chunk_fts, rowid, text, heading_path)
            VALUES ('delete', old.rowid, old.text, old.heading_path);
            INSERT INTO chunk_fts(rowid, text, heading_path)
            VALUES (new.rowid, new.text, new.heading_path);
        END;

        INSERT INTO chunk_fts(chunk_fts) VALUES ('rebuild');
        ",
    )
}
