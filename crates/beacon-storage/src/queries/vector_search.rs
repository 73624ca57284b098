//! Brute-force cosine search over stored embeddings.

use std::cmp::Ordering;

use rusqlite::{params_from_iter, types::Value, Connection};

use beacon_core::errors::BeaconResult;
use beacon_core::models::{ChunkId, MetadataFilter};

use super::chunk_ops::bytes_to_f32_vec;
use super::filter_sql;
use crate::to_storage_err;

/// Up to `k` `(chunk_id, cosine distance)` pairs, nearest first.
///
/// Only chunks whose embedding has the query's dimensionality are compared.
/// A zero query vector has no direction and matches nothing.
pub fn nearest_neighbors(
    conn: &Connection,
    query: &[f32],
    filter: &MetadataFilter,
    k: usize,
) -> BeaconResult<Vec<(ChunkId, f64)>> {
    let query_norm = norm(query);
    if k == 0 || query.is_empty() || query_norm == 0.0 {
        return Ok(Vec::new());
    }

    let clause = filter_sql::build(filter, "c", 2);
    let sql = format!(
        "SELECT c.chunk_id, c.embedding FROM chunks c WHERE c.embedding_dim = ?1{}",
        clause.and_sql()
    );
    let mut params = vec![Value::Integer(query.len() as i64)];
    params.extend(clause.params);

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(params), |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut scored = Vec::new();
    for row in rows {
        let (id, blob) = row.map_err(|e| to_storage_err(e.to_string()))?;
        let candidate = bytes_to_f32_vec(&blob);
        let candidate_norm = norm(&candidate);
        if candidate_norm == 0.0 {
            continue;
        }
        let dot: f64 = query
            .iter()
            .zip(&candidate)
            .map(|(a, b)| f64::from(*a) * f64::from(*b))
            .sum();
        let cosine = (dot / (query_norm * candidate_norm)).clamp(-1.0, 1.0);
        scored.push((id, 1.0 - cosine));
    }

    scored.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    scored.truncate(k);
    Ok(scored)
}

fn norm(v: &[f32]) -> f64 {
    v.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt()
}
