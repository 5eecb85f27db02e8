//! Pod configuration
//!
//! The configuration declares the upstream sources, which of them is active,
//! and the patch offset. It is looked up in this order:
//!
//! 1. The path passed with `--config`
//! 2. `cruby.toml` in the current directory
//! 3. `~/.config/cruby-pod/config.toml`
//! 4. The built-in declaration ([`PodConfig::default`])
//!
//! ```toml
//! patch_offset = 0
//! repository = "https://github.com/xord/cruby"
//!
//! [ruby]
//! active = "2.5"
//!
//! [ruby.sources."2.5"]
//! url = "https://cache.ruby-lang.org/pub/ruby/2.5/ruby-2.5.5.tar.gz"
//! sha256 = "28a945fdf340e6ba04fc890b98648342e3cccfd6d223a48f3810572f11b2514c"
//! ```
//!
//! Files ending in `.json`, `.yml` or `.yaml` are read with the matching
//! format; everything else is read as TOML.

use crate::source::{ArchiveSource, SourceSelection, SourceTable};
use crate::version::PatchOffset;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Project-local configuration file name
pub const PROJECT_CONFIG_FILE: &str = "cruby.toml";

pub const DEFAULT_REPOSITORY: &str = "https://github.com/xord/cruby";
pub const DEFAULT_RUBY_LABEL: &str = "2.5";

const DEFAULT_RUBY_SOURCES: [(&str, &str, &str); 3] = [
    (
        "2.6",
        "https://cache.ruby-lang.org/pub/ruby/2.6/ruby-2.6.1.tar.gz",
        "17024fb7bb203d9cf7a5a42c78ff6ce77140f9d083676044a7db67f1e5191cb8",
    ),
    (
        "2.5",
        "https://cache.ruby-lang.org/pub/ruby/2.5/ruby-2.5.5.tar.gz",
        "28a945fdf340e6ba04fc890b98648342e3cccfd6d223a48f3810572f11b2514c",
    ),
    (
        "2.4",
        "https://cache.ruby-lang.org/pub/ruby/2.4/ruby-2.4.6.tar.gz",
        "de0dc8097023716099f7c8a6ffc751511b90de7f5694f401b59f2d071db910be",
    ),
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseYaml {
        path: PathBuf,
        source: serde_yml::Error,
    },
}

/// Serialization format of a config file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("json") => ConfigFormat::Json,
            Some("yml") | Some("yaml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Toml,
        }
    }
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    BuiltIn,
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigOrigin::File(path) => write!(f, "{}", path.display()),
            ConfigOrigin::BuiltIn => write!(f, "built-in"),
        }
    }
}

/// Packaging configuration for the CRuby pod
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodConfig {
    /// Bumped when the packaging changes but the upstream source does not
    #[serde(default)]
    pub patch_offset: PatchOffset,

    #[serde(default = "default_repository")]
    pub repository: String,

    pub ruby: SourceSelection,

    /// Optional OpenSSL sources built alongside ruby
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openssl: Option<SourceSelection>,
}

fn default_repository() -> String {
    DEFAULT_REPOSITORY.to_string()
}

impl Default for PodConfig {
    fn default() -> Self {
        let sources = DEFAULT_RUBY_SOURCES
            .iter()
            .map(|(label, url, sha256)| (*label, ArchiveSource::new(url, sha256)))
            .collect::<SourceTable>();

        Self {
            patch_offset: PatchOffset::default(),
            repository: default_repository(),
            ruby: SourceSelection::new(DEFAULT_RUBY_LABEL, sources),
            openssl: None,
        }
    }
}

impl PodConfig {
    /// Load the configuration, following the lookup order in the module docs
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigOrigin), ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            let config = Self::from_file(path)?;
            return Ok((config, ConfigOrigin::File(path.to_path_buf())));
        }

        let candidates = [Some(PathBuf::from(PROJECT_CONFIG_FILE)), user_config_path()];
        for path in candidates.into_iter().flatten() {
            if path.exists() {
                let config = Self::from_file(&path)?;
                return Ok((config, ConfigOrigin::File(path)));
            }
            debug!("no config at {}", path.display());
        }

        debug!("using built-in configuration");
        Ok((Self::default(), ConfigOrigin::BuiltIn))
    }

    /// Read a configuration file in the format implied by its extension
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let format = ConfigFormat::from_path(path);
        debug!("loading {:?} config from {}", format, path.display());
        Self::parse(&content, format, path)
    }

    fn parse(content: &str, format: ConfigFormat, path: &Path) -> Result<Self, ConfigError> {
        let path = path.to_path_buf();
        match format {
            ConfigFormat::Toml => {
                toml::from_str(content).map_err(|source| ConfigError::ParseToml { path, source })
            }
            ConfigFormat::Json => serde_json::from_str(content)
                .map_err(|source| ConfigError::ParseJson { path, source }),
            ConfigFormat::Yaml => serde_yml::from_str(content)
                .map_err(|source| ConfigError::ParseYaml { path, source }),
        }
    }

    /// Apply command-line overrides on top of the loaded values
    pub fn with_overrides(
        mut self,
        ruby: Option<&str>,
        patch_offset: Option<PatchOffset>,
    ) -> Self {
        if let Some(label) = ruby {
            self.ruby.active = label.to_string();
        }
        if let Some(offset) = patch_offset {
            self.patch_offset = offset;
        }
        self
    }
}

/// Returns the user config path: `~/.config/cruby-pod/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .ok()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;

    if config_base.as_os_str().is_empty() {
        return None;
    }

    Some(config_base.join("cruby-pod").join("config.toml"))
}
