//! Chunk rows.

use rusqlite::{params, params_from_iter, Connection, Row};

use beacon_core::errors::{BeaconResult, StorageError};
use beacon_core::models::{Chunk, ChunkId, DocumentMetadata};

use crate::to_storage_err;

/// SQLite's default variable limit is far above this; it keeps statements small.
const LOOKUP_BATCH: usize = 500;

const CHUNK_COLUMNS: &str = "chunk_id, chunk_index, text, token_count, heading_path, tags,
     campus, building, department, lab, professor, source_url,
     embedding, embedding_model";

pub fn insert_chunks(conn: &Connection, doc_id: i64, chunks: &[Chunk]) -> BeaconResult<usize> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO chunks (chunk_id, doc_id, chunk_index, text, token_count, heading_path,
                                 tags, campus, building, department, lab, professor, source_url,
                                 embedding, embedding_model, embedding_dim)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    for chunk in chunks {
        let meta = &chunk.metadata;
        stmt.execute(params![
            chunk.id,
            doc_id,
            chunk.index as i64,
            chunk.text,
            chunk.token_count as i64,
            serde_json::to_string(&chunk.heading_path)?,
            serde_json::to_string(&meta.tags)?,
            meta.campus,
            meta.building,
            meta.department,
            meta.lab,
            serde_json::to_string(&meta.professors)?,
            chunk.document_url,
            f32_vec_to_bytes(&chunk.embedding),
            chunk.embedding_model,
            chunk.embedding.len() as i64,
        ])
        .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(chunks.len())
}

pub fn delete_chunks_for_document(conn: &Connection, doc_id: i64) -> BeaconResult<usize> {
    conn.execute("DELETE FROM chunks WHERE doc_id = ?1", params![doc_id])
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Resolve ids to chunks. Unknown ids are skipped.
pub fn get_chunks(conn: &Connection, ids: &[ChunkId]) -> BeaconResult<Vec<Chunk>> {
    let mut out = Vec::with_capacity(ids.len());
    for batch in ids.chunks(LOOKUP_BATCH) {
        let placeholders = vec!["?"; batch.len()].join(", ");
        let sql = format!("SELECT {CHUNK_COLUMNS} FROM chunks WHERE chunk_id IN ({placeholders})");
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| to_storage_err(e.to_string()))?;
        let rows = stmt
            .query_map(params_from_iter(batch.iter()), parse_chunk_row)
            .map_err(|e| to_storage_err(e.to_string()))?;
        for row in rows {
            out.push(row.map_err(|e| to_storage_err(e.to_string()))?.into_chunk()?);
        }
    }
    Ok(out)
}

pub fn chunks_for_document(conn: &Connection, url: &str) -> BeaconResult<Vec<Chunk>> {
    let sql = format!("SELECT {CHUNK_COLUMNS} FROM chunks WHERE source_url = ?1 ORDER BY chunk_index");
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![url], parse_chunk_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| to_storage_err(e.to_string()))?.into_chunk()?);
    }
    Ok(out)
}

pub fn count_chunks(conn: &Connection) -> BeaconResult<usize> {
    conn.query_row("SELECT COUNT(*) FROM chunks", [], |row| row.get::<_, i64>(0))
        .map(|n| n as usize)
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Column values for one chunk row, before JSON and blob decoding.
struct ChunkRow {
    id: String,
    index: i64,
    text: String,
    token_count: i64,
    heading_path: String,
    tags: String,
    campus: Option<String>,
    building: Option<String>,
    department: Option<String>,
    lab: Option<String>,
    professors: String,
    document_url: String,
    embedding: Vec<u8>,
    embedding_model: String,
}

fn parse_chunk_row(row: &Row<'_>) -> rusqlite::Result<ChunkRow> {
    Ok(ChunkRow {
        id: row.get(0)?,
        index: row.get(1)?,
        text: row.get(2)?,
        token_count: row.get(3)?,
        heading_path: row.get(4)?,
        tags: row.get(5)?,
        campus: row.get(6)?,
        building: row.get(7)?,
        department: row.get(8)?,
        lab: row.get(9)?,
        professors: row.get(10)?,
        document_url: row.get(11)?,
        embedding: row.get(12)?,
        embedding_model: row.get(13)?,
    })
}

impl ChunkRow {
    fn into_chunk(self) -> BeaconResult<Chunk> {
        if self.embedding.len() % 4 != 0 {
            return Err(self.corrupt(format!(
                "embedding blob of {} bytes",
                self.embedding.len()
            )));
        }
        let heading_path = self.json_list(&self.heading_path, "heading_path")?;
        let professors = self.json_list(&self.professors, "professor")?;
        let tags = self.json_list(&self.tags, "tags")?;
        Ok(Chunk {
            embedding: bytes_to_f32_vec(&self.embedding),
            id: self.id,
            document_url: self.document_url,
            index: self.index as usize,
            text: self.text,
            token_count: self.token_count as usize,
            heading_path,
            metadata: DocumentMetadata {
                campus: self.campus,
                building: self.building,
                department: self.department,
                lab: self.lab,
                professors,
                tags,
            },
            embedding_model: self.embedding_model,
        })
    }

    fn json_list(&self, raw: &str, column: &str) -> BeaconResult<Vec<String>> {
        serde_json::from_str(raw).map_err(|e| self.corrupt(format!("{column}: {e}")))
    }

    fn corrupt(&self, details: String) -> beacon_core::BeaconError {
        StorageError::CorruptRecord {
            id: self.id.clone(),
            details,
        }
        .into()
    }
}

/// Little-endian f32 packing used for the `embedding` column.
pub fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|x| x.to_le_bytes()).collect()
}

pub fn bytes_to_f32_vec(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}
