//! Candidate inspection and classification.
//!
//! A candidate is a path where the library might live. Inspecting it gathers
//! the facts acceptance depends on (existence, suffix, size); classifying it
//! labels an accepted file as a full implementation or a compatibility shim.
//! Classification is informational and never causes a rejection.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::platform::Platform;
use crate::ports::{FileFacts, FileProbe};

/// Files smaller than this are presumed to be compatibility shims.
pub const DEFAULT_SHIM_THRESHOLD_BYTES: u64 = 500_000;

/// A path plus the facts derived from probing it once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryCandidate {
    pub path: PathBuf,
    /// `None` if nothing exists at `path`.
    pub facts: Option<FileFacts>,
    pub extension_ok: bool,
}

impl LibraryCandidate {
    /// Probe `path` exactly once.
    pub fn inspect(path: &Path, platform: Platform, probe: &dyn FileProbe) -> Self {
        Self {
            path: path.to_path_buf(),
            facts: probe.stat(path),
            extension_ok: platform.has_library_extension(path),
        }
    }

    pub const fn exists(&self) -> bool {
        self.facts.is_some()
    }

    /// Size in bytes, if the candidate is a regular file.
    pub fn size(&self) -> Option<u64> {
        self.facts.filter(FileFacts::is_file).map(|facts| facts.len)
    }
}

/// How a candidate binary is presumed to behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClassificationVerdict {
    /// A complete implementation of the library.
    FullImplementation,
    /// A smaller reimplementation proxying to another implementation.
    CompatibilityShim,
}

impl fmt::Display for ClassificationVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullImplementation => f.write_str("full implementation"),
            Self::CompatibilityShim => f.write_str("compatibility shim"),
        }
    }
}

/// Strategy for labelling an accepted candidate.
pub trait Classifier: Send + Sync {
    fn classify(&self, candidate: &LibraryCandidate) -> ClassificationVerdict;
}

/// Classifies by file size against a fixed threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeThresholdClassifier {
    threshold: u64,
}

impl SizeThresholdClassifier {
    pub const fn new(threshold: u64) -> Self {
        Self { threshold }
    }

    pub const fn threshold(&self) -> u64 {
        self.threshold
    }
}

impl Default for SizeThresholdClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_SHIM_THRESHOLD_BYTES)
    }
}

impl Classifier for SizeThresholdClassifier {
    fn classify(&self, candidate: &LibraryCandidate) -> ClassificationVerdict {
        match candidate.size() {
            Some(len) if len >= self.threshold => ClassificationVerdict::FullImplementation,
            _ => ClassificationVerdict::CompatibilityShim,
        }
    }
}

/// A candidate that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcceptedCandidate {
    pub path: PathBuf,
    pub size: u64,
    pub verdict: ClassificationVerdict,
}
