//! Override channel port.
//!
//! The channel is the hand-off point between the resolution engine and the
//! library's own loader. The loader reads it exactly once, lazily, on the
//! first library call; anything published after that is ignored.

use std::sync::OnceLock;

use crate::error::PublishError;

/// Default name of the side channel SDL consults for its dynamic API.
pub const SDL_DYNAMIC_API: &str = "SDL_DYNAMIC_API";

/// Port for reading and writing the override path.
///
/// The runtime implements this over the process environment. Embedders whose
/// library exposes a programmatic hook use [`InMemoryChannel`] and pass the
/// published value to the library's init call themselves.
pub trait OverrideChannel: Send + Sync {
    /// Name of the channel, for diagnostics.
    fn name(&self) -> &str;

    /// Current raw value, if any. May be empty.
    fn current(&self) -> Option<String>;

    /// Set the override value.
    fn publish(&self, value: &str) -> Result<(), PublishError>;

    /// True if the channel holds a non-empty value.
    fn is_active(&self) -> bool {
        self.current().is_some_and(|value| !value.is_empty())
    }
}

/// Write-once in-process channel for programmatic hand-off.
#[derive(Debug, Default)]
pub struct InMemoryChannel {
    value: OnceLock<String>,
}

impl InMemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A channel that already carries an override, as if the user set it
    /// before startup. An empty value is no override and leaves the channel
    /// open for publication.
    pub fn with_value(value: impl Into<String>) -> Self {
        let channel = Self::new();
        let value = value.into();
        if !value.is_empty() {
            let _ = channel.value.set(value);
        }
        channel
    }

    /// Published value, for passing into the library's init call.
    pub fn get(&self) -> Option<&str> {
        self.value.get().map(String::as_str)
    }
}

impl OverrideChannel for InMemoryChannel {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn current(&self) -> Option<String> {
        self.value.get().cloned()
    }

    fn publish(&self, value: &str) -> Result<(), PublishError> {
        if value.is_empty() {
            return Err(PublishError::EmptyPath);
        }
        self.value
            .set(value.to_string())
            .map_err(|_| PublishError::AlreadyPublished {
                current: self.value.get().cloned().unwrap_or_default(),
            })
    }
}
