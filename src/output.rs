//! Output formatting for JSON and text modes
//!
//! Provides types for structured output that can be serialized to JSON
//! for the packaging pipeline, or displayed as text for maintainers.

use crate::resolve::{Problem, Resolution, SourceReport};
use crate::version::VersionTriple;
use serde::Serialize;

/// Result of a version operation
#[derive(Debug, Serialize)]
pub struct VersionOutput {
    pub version: String,
}

/// An archive source as printed
#[derive(Debug, Serialize)]
pub struct SourceEntry {
    pub label: String,
    pub url: String,
    pub sha256: String,
}

/// Result of a show operation
#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub config: String,
    pub repository: String,
    pub ruby: SourceEntry,
    pub ruby_version: VersionTriple,
    pub patch_offset: u32,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openssl: Option<SourceEntry>,
}

/// Result of a list operation
#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub sources: Vec<ListEntry>,
}

/// A single entry in the list output
#[derive(Debug, Serialize)]
pub struct ListEntry {
    pub label: String,
    pub url: String,
    pub sha256: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ruby_version: Option<VersionTriple>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a check operation
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub valid: bool,
    pub problems: Vec<String>,
}

impl SourceEntry {
    pub fn new(label: &str, url: &str, sha256: &str) -> Self {
        Self {
            label: label.to_string(),
            url: url.to_string(),
            sha256: sha256.to_string(),
        }
    }
}

impl ShowOutput {
    pub fn new(resolution: &Resolution, repository: &str, config: &str) -> Self {
        Self {
            config: config.to_string(),
            repository: repository.to_string(),
            ruby: SourceEntry::new(
                &resolution.label,
                &resolution.source.url,
                &resolution.source.sha256,
            ),
            ruby_version: resolution.triple,
            patch_offset: resolution.patch_offset.get(),
            version: resolution.version.clone(),
            openssl: resolution
                .openssl
                .as_ref()
                .map(|(label, source)| SourceEntry::new(label, &source.url, &source.sha256)),
        }
    }
}

impl ListEntry {
    pub fn new(report: &SourceReport) -> Self {
        let (ruby_version, version, error) = match &report.version {
            Ok((triple, version)) => (Some(*triple), Some(version.clone()), None),
            Err(e) => (None, None, Some(e.to_string())),
        };

        Self {
            label: report.label.clone(),
            url: report.source.url.clone(),
            sha256: report.source.sha256.clone(),
            active: report.active,
            ruby_version,
            version,
            error,
        }
    }
}

impl CheckOutput {
    pub fn new(problems: &[Problem]) -> Self {
        Self {
            valid: problems.is_empty(),
            problems: problems.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Print JSON output to stdout
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    }
}
