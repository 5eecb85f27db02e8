//! Upstream source archives
//!
//! Each table maps a label (e.g. `"2.5"`) to the tarball URL and its SHA-256
//! digest. Which entry is active is carried explicitly by [`SourceSelection`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Length of a hex-encoded SHA-256 digest
pub const SHA256_HEX_LEN: usize = 64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Unknown source '{label}'. Available: {}", .available.join(", "))]
    UnknownLabel {
        label: String,
        available: Vec<String>,
    },
}

/// A downloadable tarball and its integrity hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveSource {
    pub url: String,
    pub sha256: String,
}

impl ArchiveSource {
    pub fn new(url: &str, sha256: &str) -> Self {
        Self {
            url: url.to_string(),
            sha256: sha256.to_string(),
        }
    }

    /// Whether the digest is 64 hex characters
    pub fn has_well_formed_digest(&self) -> bool {
        self.sha256.len() == SHA256_HEX_LEN
            && self.sha256.chars().all(|c| c.is_ascii_hexdigit())
    }
}

/// Label → source, ordered by label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceTable(BTreeMap<String, ArchiveSource>);

impl SourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: &str, source: ArchiveSource) {
        self.0.insert(label.to_string(), source);
    }

    pub fn get(&self, label: &str) -> Option<&ArchiveSource> {
        self.0.get(label)
    }

    pub fn select(&self, label: &str) -> Result<&ArchiveSource, SourceError> {
        self.get(label).ok_or_else(|| SourceError::UnknownLabel {
            label: label.to_string(),
            available: self.labels().map(str::to_string).collect(),
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArchiveSource)> {
        self.0.iter().map(|(label, source)| (label.as_str(), source))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, ArchiveSource)> for SourceTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, ArchiveSource)>>(iter: I) -> Self {
        let mut table = SourceTable::new();
        for (label, source) in iter {
            table.insert(label, source);
        }
        table
    }
}

/// A source table together with the label of the entry in use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSelection {
    pub active: String,
    #[serde(default)]
    pub sources: SourceTable,
}

impl SourceSelection {
    pub fn new(active: &str, sources: SourceTable) -> Self {
        Self {
            active: active.to_string(),
            sources,
        }
    }

    pub fn active_source(&self) -> Result<&ArchiveSource, SourceError> {
        self.sources.select(&self.active)
    }
}
