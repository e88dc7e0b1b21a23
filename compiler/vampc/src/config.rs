//! Compiler configuration, read from a `vamp.toml`.
//!
//! ```toml
//! [package]
//! name = "demo"
//! entry = "main.vamp"
//!
//! [types]
//! tag_policy = "untagged-accepts-any"
//! width_policy = "extensible"
//!
//! [cache]
//! canonicalize_layouts = true
//! ```
//!
//! Every section and key is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vamp_types::{TagPolicy, TuplePolicy, WidthPolicy};

/// Error while loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Complete compiler configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub package: PackageConfig,
    pub types: TypesConfig,
    pub cache: CacheConfig,
}

impl CompilerConfig {
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&source)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Package metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    pub name: Option<String>,
    pub version: Option<String>,
    pub dependencies: Vec<String>,
    /// Source root, relative to the package directory.
    pub root: String,
    /// Entry module, relative to `root`.
    pub entry: String,
}

impl Default for PackageConfig {
    fn default() -> Self {
        PackageConfig {
            name: None,
            version: None,
            dependencies: Vec::new(),
            root: "src".to_owned(),
            entry: "main.vamp".to_owned(),
        }
    }
}

/// Tuple type compatibility policies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypesConfig {
    pub tag_policy: TagPolicy,
    pub width_policy: WidthPolicy,
}

impl TypesConfig {
    pub fn tuple_policy(&self) -> TuplePolicy {
        TuplePolicy {
            tags: self.tag_policy,
            width: self.width_policy,
        }
    }
}

/// Layout cache behavior.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Share one layout per distinct shape. When off, every construction
    /// gets a fresh layout and equality is always structural.
    pub canonicalize_layouts: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            canonicalize_layouts: true,
        }
    }
}
