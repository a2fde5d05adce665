//! Library version and introspection snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A `{major, minor, patch}` triple as SDL reports it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct LibraryVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl LibraryVersion {
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for LibraryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Snapshot of which library is servicing the dynamic API.
///
/// Assembled on demand by [`crate::ResolutionEngine::describe`]; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryInfo {
    /// Version the embedding code was compiled against.
    pub compiled_version: LibraryVersion,
    /// Version actually loaded, once the library has run its first call.
    pub linked_version: Option<LibraryVersion>,
    /// Active driver reported by the library, if initialised.
    pub active_driver: Option<String>,
    /// Whether an override path is set on the channel.
    pub override_active: bool,
}

/// What the version comparison suggests about an active override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideEffect {
    /// No override is set.
    NotRequested,
    /// The loaded version is not known yet.
    Unknown,
    /// Compiled and loaded versions differ; the override likely took effect.
    LikelyApplied,
    /// Versions are identical; the library may have fallen back to the
    /// platform default.
    PossiblyIgnored,
}

impl LibraryInfo {
    /// Heuristic reading of the snapshot. SDL gives no direct confirmation
    /// that an override was honoured.
    pub fn override_effect(&self) -> OverrideEffect {
        if !self.override_active {
            return OverrideEffect::NotRequested;
        }
        match self.linked_version {
            None => OverrideEffect::Unknown,
            Some(linked) if linked != self.compiled_version => OverrideEffect::LikelyApplied,
            Some(_) => OverrideEffect::PossiblyIgnored,
        }
    }
}

impl fmt::Display for LibraryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "compiled_version = {}", self.compiled_version)?;
        match self.linked_version {
            Some(v) => writeln!(f, "linked_version = {v}")?,
            None => writeln!(f, "linked_version = unknown")?,
        }
        writeln!(
            f,
            "active_driver = {}",
            self.active_driver.as_deref().unwrap_or("none")
        )?;
        write!(f, "override_active = {}", self.override_active)
    }
}
