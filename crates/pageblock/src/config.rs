//! Environment configuration (`pageblock.toml`).
//!
//! ```toml
//! default-directory = "views"
//! view-extension = "html"
//!
//! [namespaces]
//! components = "~/shared/components"
//! ```
//!
//! Relative directories are resolved against the directory containing the
//! configuration file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Directory and extension settings applied before any render.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct EnvironmentConfig {
    /// Base directory of the default namespace.
    pub default_directory: Option<String>,

    /// Additional namespaces, name → base directory.
    #[serde(default)]
    pub namespaces: BTreeMap<String, String>,

    /// View file extension. Default: "html".
    pub view_extension: Option<String>,

    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl EnvironmentConfig {
    /// Load and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut config: Self = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Expand `~/` and anchor relative paths at [`base_dir`](Self::base_dir).
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let expanded = expand_path(path);
        match &self.base_dir {
            Some(base) if expanded.is_relative() => base.join(expanded),
            _ => expanded,
        }
    }
}

/// Expand a leading `~/` to the home directory.
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
