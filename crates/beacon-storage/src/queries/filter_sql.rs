//! Translate a `MetadataFilter` into SQL predicates over the `chunks` table.

use beacon_core::models::{FilterField, MetadataFilter};
use rusqlite::types::Value;

/// A conjunction of predicates with positional parameters.
#[derive(Debug, Default)]
pub struct FilterClause {
    pub predicates: Vec<String>,
    pub params: Vec<Value>,
}

impl FilterClause {
    /// `AND`-prefixed predicate list, or an empty string.
    pub fn and_sql(&self) -> String {
        self.predicates
            .iter()
            .map(|p| format!(" AND {p}"))
            .collect()
    }
}

/// Build predicates for `alias`-qualified chunk columns. Placeholders are
/// numbered from `first_param`.
pub fn build(filter: &MetadataFilter, alias: &str, first_param: usize) -> FilterClause {
    let mut clause = FilterClause::default();
    for (field, value) in filter.iter() {
        let n = first_param + clause.params.len();
        let predicate = match field {
            FilterField::Campus => format!("{alias}.campus = ?{n}"),
            FilterField::Department => format!("{alias}.department = ?{n}"),
            FilterField::Lab => format!("{alias}.lab = ?{n}"),
            FilterField::Professor => {
                format!("EXISTS (SELECT 1 FROM json_each({alias}.professor) WHERE value = ?{n})")
            }
            FilterField::Tag => {
                format!("EXISTS (SELECT 1 FROM json_each({alias}.tags) WHERE value = ?{n})")
            }
        };
        clause.predicates.push(predicate);
        clause.params.push(Value::Text(value.to_string()));
    }
    clause
}
