//! Resolution of a pod configuration into the values the packaging step uses

use crate::config::PodConfig;
use crate::source::{ArchiveSource, SourceError};
use crate::version::{InvalidVersionError, PatchOffset, VersionTriple, parse_version_triple};
use std::fmt;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Version(#[from] InvalidVersionError),
}

/// The active ruby source and the versions derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub label: String,
    pub source: ArchiveSource,
    pub triple: VersionTriple,
    pub patch_offset: PatchOffset,
    /// Extended version used to tag the packaged artifact
    pub version: String,
    pub openssl: Option<(String, ArchiveSource)>,
}

/// Resolve the active sources of a configuration
pub fn resolve(config: &PodConfig) -> Result<Resolution, ResolveError> {
    let source = config.ruby.active_source()?;
    let triple = parse_version_triple(&source.url)?;
    let version = triple.extend(config.patch_offset);
    debug!(
        "resolved ruby {} ({}) to {}",
        config.ruby.active, triple, version
    );

    let openssl = match &config.openssl {
        Some(selection) => Some((selection.active.clone(), selection.active_source()?.clone())),
        None => None,
    };

    Ok(Resolution {
        label: config.ruby.active.clone(),
        source: source.clone(),
        triple,
        patch_offset: config.patch_offset,
        version,
        openssl,
    })
}

/// Derived versions for one entry of the ruby source table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub label: String,
    pub source: ArchiveSource,
    pub active: bool,
    pub version: Result<(VersionTriple, String), InvalidVersionError>,
}

/// Derive versions for every ruby source, active or not
pub fn resolve_all(config: &PodConfig) -> Vec<SourceReport> {
    config
        .ruby
        .sources
        .iter()
        .map(|(label, source)| SourceReport {
            label: label.to_string(),
            source: source.clone(),
            active: label == config.ruby.active,
            version: parse_version_triple(&source.url)
                .map(|triple| (triple, triple.extend(config.patch_offset))),
        })
        .collect()
}

/// A defect found by [`check`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    UnknownActive {
        table: &'static str,
        error: SourceError,
    },
    InvalidVersion {
        label: String,
        error: InvalidVersionError,
    },
    MalformedDigest {
        table: &'static str,
        label: String,
        sha256: String,
    },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::UnknownActive { table, error } => write!(f, "{}: {}", table, error),
            Problem::InvalidVersion { label, error } => write!(f, "ruby {}: {}", label, error),
            Problem::MalformedDigest {
                table,
                label,
                sha256,
            } => write!(
                f,
                "{} {}: sha256 '{}' is not a 64-character hex digest",
                table, label, sha256
            ),
        }
    }
}

/// Validate a whole configuration; an empty result means it is usable
pub fn check(config: &PodConfig) -> Vec<Problem> {
    let mut problems = Vec::new();

    if let Err(error) = config.ruby.active_source() {
        problems.push(Problem::UnknownActive {
            table: "ruby",
            error,
        });
    }

    for (label, source) in config.ruby.sources.iter() {
        if let Err(error) = parse_version_triple(&source.url) {
            problems.push(Problem::InvalidVersion {
                label: label.to_string(),
                error,
            });
        }
    }
    push_digest_problems(&mut problems, "ruby", config.ruby.sources.iter());

    if let Some(openssl) = &config.openssl {
        if let Err(error) = openssl.active_source() {
            problems.push(Problem::UnknownActive {
                table: "openssl",
                error,
            });
        }
        push_digest_problems(&mut problems, "openssl", openssl.sources.iter());
    }

    problems
}

fn push_digest_problems<'a>(
    problems: &mut Vec<Problem>,
    table: &'static str,
    sources: impl Iterator<Item = (&'a str, &'a ArchiveSource)>,
) {
    for (label, source) in sources {
        if !source.has_well_formed_digest() {
            problems.push(Problem::MalformedDigest {
                table,
                label: label.to_string(),
                sha256: source.sha256.clone(),
            });
        }
    }
}
