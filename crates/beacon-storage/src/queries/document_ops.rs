//! Document rows.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use beacon_core::errors::{BeaconResult, StorageError};
use beacon_core::models::Document;
use beacon_core::traits::StoredDocument;

use crate::to_storage_err;

/// Insert or update the document row by URL and return its id.
pub fn upsert_document(conn: &Connection, document: &Document) -> BeaconResult<i64> {
    let meta = serde_json::to_string(&document.metadata)?;
    conn.query_row(
        "INSERT INTO documents (source_url, title, content_hash, fetched_at, meta)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(source_url) DO UPDATE SET
            title = excluded.title,
            content_hash = excluded.content_hash,
            fetched_at = excluded.fetched_at,
            meta = excluded.meta,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
         RETURNING doc_id",
        params![
            document.url,
            document.title,
            document.content_hash,
            document.fetched_at.to_rfc3339(),
            meta,
        ],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn find_document(conn: &Connection, url: &str) -> BeaconResult<Option<StoredDocument>> {
    let row = conn
        .query_row(
            "SELECT d.source_url, d.title, d.content_hash, d.fetched_at,
                    (SELECT COUNT(*) FROM chunks c WHERE c.doc_id = d.doc_id)
             FROM documents d WHERE d.source_url = ?1",
            params![url],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, i64>(4)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    row.map(|(url, title, content_hash, fetched_at, chunk_count)| -> BeaconResult<_> {
        Ok(StoredDocument {
            fetched_at: parse_timestamp(&url, &fetched_at)?,
            url,
            title,
            content_hash,
            chunk_count: chunk_count as usize,
        })
    })
    .transpose()
}

pub fn list_documents(conn: &Connection) -> BeaconResult<Vec<StoredDocument>> {
    let mut stmt = conn
        .prepare("SELECT source_url FROM documents ORDER BY source_url")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let urls = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut docs = Vec::with_capacity(urls.len());
    for url in urls {
        if let Some(doc) = find_document(conn, &url)? {
            docs.push(doc);
        }
    }
    Ok(docs)
}

/// Delete a document and its chunks. Returns the number of chunks removed.
pub fn delete_document(conn: &Connection, url: &str) -> BeaconResult<Option<usize>> {
    let doc_id: Option<i64> = conn
        .query_row(
            "SELECT doc_id FROM documents WHERE source_url = ?1",
            params![url],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    let Some(doc_id) = doc_id else {
        return Ok(None);
    };
    let removed = super::chunk_ops::delete_chunks_for_document(conn, doc_id)?;
    conn.execute("DELETE FROM documents WHERE doc_id = ?1", params![doc_id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(Some(removed))
}

fn parse_timestamp(id: &str, raw: &str) -> BeaconResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            StorageError::CorruptRecord {
                id: id.to_string(),
                details: format!("bad timestamp '{raw}': {e}"),
            }
            .into()
        })
}
