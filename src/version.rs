//! Version derivation from source-archive URLs
//!
//! The upstream version is read out of the tarball name, e.g.
//! `https://cache.ruby-lang.org/pub/ruby/2.5/ruby-2.5.5.tar.gz` → `2.5.5`.
//! The packaged artifact is tagged with an extended version that folds the
//! patch offset into the last component: `2.5.5` with offset `2` → `2.5.502`.
//!
//! Known limitation: each component is a single digit. `ruby-2.10.0.tar.gz`
//! does not match and is rejected rather than mis-parsed. Artifact names
//! downstream depend on this exact behaviour.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Offsets must stay below this so they never spill into the patch digit.
pub const PATCH_OFFSET_LIMIT: u32 = 100;

static TARBALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ruby-([0-9])\.([0-9])\.([0-9])(?:-[A-Za-z0-9_]*)?\.tar\.gz")
        .expect("tarball pattern is valid")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid ruby version in source url '{url}'")]
pub struct InvalidVersionError {
    pub url: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("patch offset {0} is out of range (must be below 100)")]
pub struct PatchOffsetError(pub u32);

/// Maintainer-controlled counter for repackagings of the same upstream version
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PatchOffset(u32);

impl PatchOffset {
    pub fn new(value: u32) -> Result<Self, PatchOffsetError> {
        if value >= PATCH_OFFSET_LIMIT {
            return Err(PatchOffsetError(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for PatchOffset {
    type Error = PatchOffsetError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PatchOffset> for u32 {
    fn from(offset: PatchOffset) -> Self {
        offset.0
    }
}

impl fmt::Display for PatchOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Upstream `(major, minor, patch)` version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct VersionTriple {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl VersionTriple {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Format the extended version: `major.minor.(patch * 100 + offset)`
    pub fn extend(&self, patch_offset: PatchOffset) -> String {
        let patch = self.patch * PATCH_OFFSET_LIMIT + patch_offset.get();
        format!("{}.{}.{}", self.major, self.minor, patch)
    }
}

impl fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Parse the upstream version triple out of a ruby tarball URL
///
/// The `ruby-X.Y.Z[-suffix].tar.gz` name may appear anywhere in the URL.
/// Any `-suffix` (e.g. `-preview1`) is ignored.
pub fn parse_version_triple(url: &str) -> Result<VersionTriple, InvalidVersionError> {
    let invalid = || InvalidVersionError {
        url: url.to_string(),
    };

    let caps = TARBALL_RE.captures(url).ok_or_else(invalid)?;
    let components = caps
        .iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str().parse::<u32>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;

    match components.as_slice() {
        [major, minor, patch] => Ok(VersionTriple::new(*major, *minor, *patch)),
        _ => Err(invalid()),
    }
}

/// Derive the extended version string used to tag the packaged artifact
pub fn extended_version(
    url: &str,
    patch_offset: PatchOffset,
) -> Result<String, InvalidVersionError> {
    let triple = parse_version_triple(url)?;
    Ok(triple.extend(patch_offset))
}
