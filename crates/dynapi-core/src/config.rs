//! Resolver configuration.
//!
//! All fields have sensible defaults so an empty configuration reproduces
//! SDL's conventions exactly. Values can come from environment variables or
//! a JSON document.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::candidate::DEFAULT_SHIM_THRESHOLD_BYTES;
use crate::error::ConfigError;
use crate::platform::Platform;
use crate::ports::SDL_DYNAMIC_API;

pub const ENV_OVERRIDE_VARIABLE: &str = "DYNAPI_OVERRIDE_VARIABLE";
pub const ENV_LIBRARY_NAME: &str = "DYNAPI_LIBRARY_NAME";
pub const ENV_BASE_DIR: &str = "DYNAPI_BASE_DIR";
pub const ENV_EXTRA_DIRS: &str = "DYNAPI_EXTRA_DIRS";
pub const ENV_SHIM_THRESHOLD: &str = "DYNAPI_SHIM_THRESHOLD";

/// Settings for a [`crate::ResolutionEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Name of the environment variable the library reads.
    pub override_variable: String,

    /// Library file name to look for. `None` uses the platform default.
    pub library_file_name: Option<String>,

    /// First directory searched. `None` uses the current working directory,
    /// falling back to the executable's directory.
    pub base_dir: Option<PathBuf>,

    /// Directories searched after the platform's system directories.
    pub extra_search_dirs: Vec<PathBuf>,

    /// Candidates below this size are classified as compatibility shims.
    pub shim_threshold_bytes: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            override_variable: SDL_DYNAMIC_API.to_string(),
            library_file_name: None,
            base_dir: None,
            extra_search_dirs: Vec::new(),
            shim_threshold_bytes: DEFAULT_SHIM_THRESHOLD_BYTES,
        }
    }
}

impl ResolverConfig {
    /// Build a configuration from `DYNAPI_*` environment variables.
    ///
    /// Unset or blank variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(name) = non_empty_var(ENV_OVERRIDE_VARIABLE) {
            config.override_variable = name;
        }
        if let Some(name) = non_empty_var(ENV_LIBRARY_NAME) {
            config.library_file_name = Some(name);
        }
        if let Some(dir) = non_empty_var(ENV_BASE_DIR) {
            config.base_dir = Some(PathBuf::from(dir));
        }
        if let Some(dirs) = env::var_os(ENV_EXTRA_DIRS) {
            config.extra_search_dirs = env::split_paths(&dirs)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
        }
        if let Some(raw) = non_empty_var(ENV_SHIM_THRESHOLD) {
            config.shim_threshold_bytes =
                raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                    key: ENV_SHIM_THRESHOLD,
                    value: raw.clone(),
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON configuration document. Missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shim_threshold_bytes == 0 {
            return Err(ConfigError::InvalidThreshold);
        }
        if let Some(name) = &self.library_file_name {
            if name.trim().is_empty() || name.contains(['/', '\\']) {
                return Err(ConfigError::InvalidFileName(name.clone()));
            }
        }
        Ok(())
    }

    /// The file name to look for on `platform`.
    pub fn file_name_for(&self, platform: Platform) -> &str {
        self.library_file_name
            .as_deref()
            .unwrap_or_else(|| platform.library_file_name())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
