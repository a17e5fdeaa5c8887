//! Config file discovery and loading for `.pageblock.toml`.
//!
//! An explicit `--config` path must load. Otherwise checks two locations in
//! precedence order:
//! 1. `./.pageblock.toml` (project-local)
//! 2. `~/.config/pageblock.toml` (user-global)

use std::path::{Path, PathBuf};

use pageblock::EnvironmentConfig;

const CONFIG_FILENAME: &str = ".pageblock.toml";
const GLOBAL_CONFIG_DIR: &str = ".config";
const GLOBAL_CONFIG_FILENAME: &str = "pageblock.toml";

/// Load the environment config from `explicit`, or from the first discovered
/// location, or return defaults.
pub(crate) fn load_environment_config(
    explicit: Option<&Path>,
) -> Result<EnvironmentConfig, pageblock::ConfigError> {
    if let Some(path) = explicit {
        let config = EnvironmentConfig::load(path)?;
        tracing::debug!(?path, "Loaded config");
        return Ok(config);
    }

    if let Some(path) = find_config_file() {
        match EnvironmentConfig::load(&path) {
            Ok(config) => {
                tracing::debug!(?path, "Loaded config");
                return Ok(config);
            }
            Err(e) => {
                tracing::warn!(?path, error = %e, "Failed to load config, using defaults");
            }
        }
    }
    Ok(EnvironmentConfig::default())
}

/// Search for config file in precedence order.
fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.is_file() {
        return Some(local);
    }

    if let Some(home) = home_dir() {
        let global = home.join(GLOBAL_CONFIG_DIR).join(GLOBAL_CONFIG_FILENAME);
        if global.is_file() {
            return Some(global);
        }
    }

    None
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
