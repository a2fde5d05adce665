//! Core domain for resolving SDL's dynamic API override.
//!
//! SDL consults the `SDL_DYNAMIC_API` side channel once, lazily, on its first
//! function call, and loads the named binary in place of the linked one. This
//! crate decides what that value should be:
//!
//! - [`discovery`] builds the ordered set of directories to search
//! - [`engine`] validates, classifies and publishes the first good candidate
//! - [`ports`] abstracts the channel, the filesystem and library introspection
//!
//! OS-backed adapters and startup sequencing live in `dynapi-runtime`.
#![deny(unused_crate_dependencies)]

pub mod candidate;
pub mod config;
pub mod discovery;
pub mod engine;
mod error;
pub mod info;
pub mod platform;
pub mod ports;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use candidate::{
    AcceptedCandidate, ClassificationVerdict, Classifier, DEFAULT_SHIM_THRESHOLD_BYTES,
    LibraryCandidate, SizeThresholdClassifier,
};
pub use config::ResolverConfig;
pub use discovery::SearchPath;
pub use engine::{Resolution, ResolutionEngine};
pub use error::{CandidateRejection, ConfigError, PublishError};
pub use info::{LibraryInfo, LibraryVersion, OverrideEffect};
pub use platform::Platform;
pub use ports::{
    EntryKind, FileFacts, FileProbe, InMemoryChannel, LibraryIntrospection, OverrideChannel,
    SDL_DYNAMIC_API, StaticIntrospection,
};
