//! Composition root: wires the OS adapters into a resolution engine.

use dynapi_core::{ConfigError, ResolutionEngine, ResolverConfig};
use tracing::warn;

use crate::env_channel::EnvVarChannel;
use crate::fs_probe::OsFileProbe;

/// Load configuration from `.env` (if present) and `DYNAPI_*` variables.
///
/// Priority: process environment > `.env` file > defaults.
pub fn load_config() -> Result<ResolverConfig, ConfigError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            warn!(error = %e, "Failed to load .env file");
        }
    }
    ResolverConfig::from_env()
}

/// Engine publishing through the environment variable named in `config`.
pub fn engine_from_config(config: ResolverConfig) -> ResolutionEngine {
    let channel = EnvVarChannel::new(config.override_variable.clone());
    ResolutionEngine::new(config, channel, OsFileProbe)
}

/// Default engine for the current process.
pub fn engine_from_env() -> Result<ResolutionEngine, ConfigError> {
    Ok(engine_from_config(load_config()?))
}
