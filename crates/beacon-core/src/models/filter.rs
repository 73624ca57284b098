use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DocumentMetadata;
use crate::errors::{BeaconError, ConfigError};

/// A filterable metadata field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterField {
    Campus,
    Department,
    Lab,
    /// Membership in the chunk's professor list.
    Professor,
    /// Membership in the chunk's tag list.
    Tag,
}

impl FilterField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Campus => "campus",
            Self::Department => "department",
            Self::Lab => "lab",
            Self::Professor => "professor",
            Self::Tag => "tag",
        }
    }

    /// List-valued fields match by membership rather than equality.
    pub fn is_membership(&self) -> bool {
        matches!(self, Self::Professor | Self::Tag)
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = BeaconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "campus" => Ok(Self::Campus),
            "department" => Ok(Self::Department),
            "lab" => Ok(Self::Lab),
            "professor" => Ok(Self::Professor),
            "tag" => Ok(Self::Tag),
            _ => Err(ConfigError::UnknownFilterField {
                field: s.to_string(),
            }
            .into()),
        }
    }
}

/// Conjunction of exact-match constraints on chunk metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataFilter {
    constraints: BTreeMap<FilterField, String>,
}

impl MetadataFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constraint; a later value for the same field replaces the earlier one.
    pub fn with(mut self, field: FilterField, value: impl Into<String>) -> Self {
        self.constraints.insert(field, value.into());
        self
    }

    pub fn insert(&mut self, field: FilterField, value: impl Into<String>) {
        self.constraints.insert(field, value.into());
    }

    /// Parse a `field=value` pair.
    pub fn parse_pair(pair: &str) -> Result<(FilterField, String), BeaconError> {
        let (field, value) = pair.split_once('=').ok_or_else(|| ConfigError::ParseFailed {
            reason: format!("filter must be field=value, got '{pair}'"),
        })?;
        Ok((field.parse()?, value.trim().to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterField, &str)> {
        self.constraints.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn get(&self, field: FilterField) -> Option<&str> {
        self.constraints.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Evaluate the filter against a metadata bag in memory.
    pub fn matches(&self, metadata: &DocumentMetadata) -> bool {
        self.iter().all(|(field, value)| match field {
            FilterField::Campus => metadata.campus.as_deref() == Some(value),
            FilterField::Department => metadata.department.as_deref() == Some(value),
            FilterField::Lab => metadata.lab.as_deref() == Some(value),
            FilterField::Professor => metadata.professors.iter().any(|p| p == value),
            FilterField::Tag => metadata.tags.iter().any(|t| t == value),
        })
    }
}

impl FromIterator<(FilterField, String)> for MetadataFilter {
    fn from_iter<I: IntoIterator<Item = (FilterField, String)>>(iter: I) -> Self {
        Self {
            constraints: iter.into_iter().collect(),
        }
    }
}
