//! Error types for candidate validation, publication and configuration.
//!
//! None of these are fatal to startup. The search loop treats every
//! [`CandidateRejection`] as "try the next directory", and a failed
//! publication only ends that candidate's turn.

use std::path::PathBuf;
use thiserror::Error;

/// Why a candidate library file was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CandidateRejection {
    /// An empty path was provided.
    #[error("Candidate path cannot be empty")]
    EmptyPath,

    /// Nothing exists at the candidate path.
    #[error("No library found at {0}")]
    NotFound(PathBuf),

    /// The path exists but is a directory or other non-file entry.
    #[error("{0} exists but is not a regular file")]
    NotAFile(PathBuf),

    /// The file name does not carry the platform's shared-library suffix.
    #[error("{path} does not have the expected {expected} extension")]
    WrongExtension {
        path: PathBuf,
        expected: &'static str,
    },
}

/// Errors that can occur when publishing an override path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    /// An empty path was provided.
    #[error("Override path cannot be empty")]
    EmptyPath,

    /// The channel cannot carry this value (e.g. non-UTF-8 or interior NUL).
    #[error("Override value cannot be published: {reason}")]
    InvalidValue { reason: String },

    /// A write-once channel already holds a value.
    #[error("Override already published as {current}")]
    AlreadyPublished { current: String },

    /// The library has already performed its first call and will not
    /// re-read the channel.
    #[error("Library already started; the override would be ignored")]
    LibraryAlreadyStarted,
}

/// Errors raised while loading or validating [`crate::ResolverConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The shim classification threshold must be positive.
    #[error("Shim threshold must be greater than zero")]
    InvalidThreshold,

    /// The configured library file name is empty or contains separators.
    #[error("Invalid library file name {0:?}: expected a bare file name")]
    InvalidFileName(String),

    /// A numeric environment value could not be parsed.
    #[error("Invalid number for {key}: {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    /// A JSON configuration document could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
