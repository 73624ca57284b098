//! FTS5 keyword ranking.

use std::sync::LazyLock;

use regex::Regex;
use rusqlite::{params_from_iter, types::Value, Connection};

use beacon_core::config::LexicalMatch;
use beacon_core::errors::BeaconResult;
use beacon_core::models::{ChunkId, MetadataFilter};

use super::filter_sql;
use crate::to_storage_err;

static TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}_]+").expect("valid pattern"));

/// Build an FTS5 MATCH expression from free text.
///
/// Every term is quoted so FTS5 operators in user input are taken literally.
/// Returns `None` when the text has no indexable terms.
pub fn match_expression(text: &str, mode: LexicalMatch) -> Option<String> {
    let terms: Vec<String> = TERM
        .find_iter(text)
        .map(|m| format!("\"{}\"", m.as_str()))
        .collect();
    if terms.is_empty() {
        return None;
    }
    let joiner = match mode {
        LexicalMatch::All => " AND ",
        LexicalMatch::Any => " OR ",
    };
    Some(terms.join(joiner))
}

/// Up to `k` `(chunk_id, score)` pairs, best first. The score is the negated
/// BM25 rank, so higher is better.
pub fn rank(
    conn: &Connection,
    text: &str,
    filter: &MetadataFilter,
    k: usize,
    mode: LexicalMatch,
) -> BeaconResult<Vec<(ChunkId, f64)>> {
    let Some(expression) = match_expression(text, mode) else {
        return Ok(Vec::new());
    };
    if k == 0 {
        return Ok(Vec::new());
    }

    let clause = filter_sql::build(filter, "c", 2);
    let limit_param = 2 + clause.params.len();
    let sql = format!(
        "SELECT c.chunk_id, bm25(chunk_fts) AS score
         FROM chunk_fts JOIN chunks c ON c.rowid = chunk_fts.rowid
         WHERE chunk_fts MATCH ?1{}
         ORDER BY score, c.chunk_id
         LIMIT ?{limit_param}",
        clause.and_sql()
    );
    let mut params = vec![Value::Text(expression)];
    params.extend(clause.params);
    params.push(Value::Integer(k as i64));

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(params), |row| {
            Ok((row.get::<_, String>(0)?, -row.get::<_, f64>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}
