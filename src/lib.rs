//! Build configuration for packaging CRuby as a pod
//!
//! Declares the upstream source archives and derives the version string that
//! tags the packaged artifact.
pub mod config;
pub mod output;
pub mod resolve;
pub mod source;
pub mod version;

pub use config::{ConfigError, PodConfig};
pub use resolve::{Resolution, ResolveError, check, resolve, resolve_all};
pub use source::{ArchiveSource, SourceError, SourceSelection, SourceTable};
pub use version::{
    InvalidVersionError, PatchOffset, PatchOffsetError, VersionTriple, extended_version,
    parse_version_triple,
};
