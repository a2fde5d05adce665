//! Resolution engine.
//!
//! Decides, once per process and before the library's first call, which
//! shared-library binary services SDL's dynamic API:
//!
//! 1. An override already on the channel wins and disables discovery.
//! 2. Otherwise the search path is walked in order; the first candidate that
//!    passes [`ResolutionEngine::test_candidate`] is published.
//! 3. If nothing is found the library falls back to its own default search.
//!
//! None of these outcomes is an error. [`Resolution`] tells them apart so
//! callers can treat [`Resolution::NoCandidateFound`] as a warning.

use std::env;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::candidate::{
    AcceptedCandidate, ClassificationVerdict, Classifier, LibraryCandidate,
    SizeThresholdClassifier,
};
use crate::config::ResolverConfig;
use crate::discovery::SearchPath;
use crate::error::{CandidateRejection, PublishError};
use crate::info::{LibraryInfo, OverrideEffect};
use crate::platform::Platform;
use crate::ports::{FileProbe, LibraryIntrospection, OverrideChannel};

/// Outcome of [`ResolutionEngine::initialize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    /// An override was already set; discovery did not run.
    OverridePresent { value: String },
    /// Discovery found and published a candidate.
    Published { candidate: AcceptedCandidate },
    /// No candidate was published. The library uses its default search.
    NoCandidateFound { probed: usize },
}

impl Resolution {
    /// Path the library will load, if one was pinned.
    pub fn override_path(&self) -> Option<&Path> {
        match self {
            Self::OverridePresent { value } => Some(Path::new(value)),
            Self::Published { candidate } => Some(&candidate.path),
            Self::NoCandidateFound { .. } => None,
        }
    }

    pub const fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

/// Discovers, validates and publishes the library override.
pub struct ResolutionEngine {
    config: ResolverConfig,
    platform: Platform,
    channel: Box<dyn OverrideChannel>,
    probe: Box<dyn FileProbe>,
    classifier: Box<dyn Classifier>,
}

impl ResolutionEngine {
    /// Create an engine for the current platform with the size classifier
    /// configured by `config`.
    pub fn new(
        config: ResolverConfig,
        channel: impl OverrideChannel + 'static,
        probe: impl FileProbe + 'static,
    ) -> Self {
        let classifier = SizeThresholdClassifier::new(config.shim_threshold_bytes);
        Self {
            config,
            platform: Platform::current(),
            channel: Box::new(channel),
            probe: Box::new(probe),
            classifier: Box::new(classifier),
        }
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Classifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub const fn platform(&self) -> Platform {
        self.platform
    }

    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn channel(&self) -> &dyn OverrideChannel {
        self.channel.as_ref()
    }

    /// File name joined onto each search directory.
    pub fn expected_file_name(&self) -> &str {
        self.config.file_name_for(self.platform)
    }

    /// True if the channel carries a non-empty override.
    pub fn is_override_active(&self) -> bool {
        self.channel.is_active()
    }

    /// Compute the search path afresh.
    pub fn search_path(&self) -> SearchPath {
        let base_dir = self.base_dir();
        SearchPath::discover(
            self.platform,
            base_dir.as_deref(),
            &self.config.extra_search_dirs,
            self.probe.as_ref(),
        )
    }

    /// Resolve the override. Never fails and never blocks startup.
    ///
    /// Must complete before the library's first function call.
    pub fn initialize(&self) -> Resolution {
        if let Some(value) = self.channel.current().filter(|v| !v.is_empty()) {
            info!(
                channel = self.channel.name(),
                path = %value,
                "Library override already set, skipping discovery"
            );
            return Resolution::OverridePresent { value };
        }

        let search_path = self.search_path();
        let mut probed = 0;

        for path in search_path.candidates(self.expected_file_name()) {
            probed += 1;

            let candidate = match self.test_candidate(&path) {
                Ok(candidate) => candidate,
                Err(reason) => {
                    debug!(path = %path.display(), %reason, "Candidate rejected");
                    continue;
                }
            };

            match self.publish(&candidate.path) {
                Ok(()) => {
                    info!(
                        path = %candidate.path.display(),
                        size = candidate.size,
                        verdict = %candidate.verdict,
                        "Published library override"
                    );
                    return Resolution::Published { candidate };
                }
                Err(e) => warn!(
                    path = %candidate.path.display(),
                    error = %e,
                    "Failed to publish candidate, trying next"
                ),
            }
        }

        debug!(
            probed,
            "No library candidate found, deferring to the platform default"
        );
        Resolution::NoCandidateFound { probed }
    }

    /// Validate a candidate file and classify it.
    ///
    /// Rejects empty paths, missing paths, non-files and files without the
    /// platform's shared-library suffix. Size only affects the verdict.
    pub fn test_candidate(&self, path: &Path) -> Result<AcceptedCandidate, CandidateRejection> {
        if path.as_os_str().is_empty() {
            return Err(CandidateRejection::EmptyPath);
        }

        let candidate = LibraryCandidate::inspect(path, self.platform, self.probe.as_ref());

        let Some(size) = candidate.size() else {
            return Err(if candidate.exists() {
                CandidateRejection::NotAFile(candidate.path)
            } else {
                CandidateRejection::NotFound(candidate.path)
            });
        };

        if !candidate.extension_ok {
            return Err(CandidateRejection::WrongExtension {
                path: candidate.path,
                expected: self.platform.extension_label(),
            });
        }

        let verdict = self.classifier.classify(&candidate);
        if verdict == ClassificationVerdict::CompatibilityShim {
            info!(
                path = %candidate.path.display(),
                size,
                "Candidate looks like a compatibility shim, running in compatibility mode"
            );
        }

        Ok(AcceptedCandidate {
            path: candidate.path,
            size,
            verdict,
        })
    }

    /// Publish `path` on the override channel.
    ///
    /// Has no effect on a library that has already made its first call.
    pub fn publish(&self, path: &Path) -> Result<(), PublishError> {
        if path.as_os_str().is_empty() {
            return Err(PublishError::EmptyPath);
        }
        let value = path.to_str().ok_or_else(|| PublishError::InvalidValue {
            reason: format!("{} is not valid UTF-8", path.display()),
        })?;
        self.channel.publish(value)
    }

    /// Snapshot of the active library, recomputed on every call.
    pub fn describe(&self, introspection: &dyn LibraryIntrospection) -> LibraryInfo {
        let info = LibraryInfo {
            compiled_version: introspection.compiled_version(),
            linked_version: introspection.linked_version(),
            active_driver: introspection.current_driver(),
            override_active: self.is_override_active(),
        };

        match info.override_effect() {
            OverrideEffect::LikelyApplied => info!(
                compiled = %info.compiled_version,
                linked = ?info.linked_version,
                "Compiled and linked versions differ, override likely took effect"
            ),
            OverrideEffect::PossiblyIgnored => warn!(
                version = %info.compiled_version,
                "Compiled and linked versions are identical, override may have fallen back to the platform default"
            ),
            OverrideEffect::Unknown => {
                debug!("Library not initialised yet, override effect unknown");
            }
            OverrideEffect::NotRequested => {}
        }

        info
    }

    fn base_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.config.base_dir {
            return Some(dir.clone());
        }
        env::current_dir().ok().or_else(|| {
            env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::LibraryVersion;
    use crate::ports::{InMemoryChannel, MockFileProbe, StaticIntrospection};
    use crate::test_utils::{FsProbe, sized_file};
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    const WINDOWS_LIB: &str = "SDL2.dll";

    fn engine_in(dir: &Path, channel: InMemoryChannel) -> ResolutionEngine {
        let config = ResolverConfig {
            base_dir: Some(dir.to_path_buf()),
            ..ResolverConfig::default()
        };
        ResolutionEngine::new(config, channel, FsProbe).with_platform(Platform::Windows)
    }

    /// Records every probed path on top of the real filesystem.
    #[derive(Clone, Default)]
    struct RecordingProbe {
        seen: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl FileProbe for RecordingProbe {
        fn stat(&self, path: &Path) -> Option<crate::ports::FileFacts> {
            self.seen.lock().unwrap().push(path.to_path_buf());
            FsProbe.stat(path)
        }
    }

    /// Fails the first publication, then delegates.
    struct FlakyChannel {
        inner: InMemoryChannel,
        failures_left: Mutex<u32>,
    }

    impl OverrideChannel for FlakyChannel {
        fn name(&self) -> &str {
            "flaky"
        }

        fn current(&self) -> Option<String> {
            self.inner.current()
        }

        fn publish(&self, value: &str) -> Result<(), PublishError> {
            let mut left = self.failures_left.lock().unwrap();
            if *left > 0 {
                *left -= 1;
                return Err(PublishError::InvalidValue {
                    reason: "simulated".to_string(),
                });
            }
            self.inner.publish(value)
        }
    }

    #[test]
    fn test_override_active_performs_zero_probes() {
        let mut probe = MockFileProbe::new();
        probe.expect_stat().never();
        let engine = ResolutionEngine::new(
            ResolverConfig::default(),
            InMemoryChannel::with_value("/custom/path/lib.so"),
            probe,
        );

        let resolution = engine.initialize();
        assert_eq!(
            resolution,
            Resolution::OverridePresent {
                value: "/custom/path/lib.so".to_string()
            }
        );
        assert_eq!(
            engine.channel().current().as_deref(),
            Some("/custom/path/lib.so")
        );
    }

    #[test]
    fn test_empty_override_still_publishes_candidate() {
        let temp = tempdir().unwrap();
        let lib = sized_file(temp.path(), WINDOWS_LIB, 600_000);
        let engine = engine_in(temp.path(), InMemoryChannel::with_value(""));

        let resolution = engine.initialize();
        assert!(resolution.is_published(), "got {resolution:?}");
        assert_eq!(resolution.override_path(), Some(lib.as_path()));
        assert_eq!(engine.channel().current().as_deref(), lib.to_str());
    }

    #[test]
    fn test_base_dir_defaults_to_current_dir() {
        let mut probe = MockFileProbe::new();
        probe
            .expect_stat()
            .returning(|_| Some(crate::ports::FileFacts::directory()));
        let engine =
            ResolutionEngine::new(ResolverConfig::default(), InMemoryChannel::new(), probe)
                .with_platform(Platform::Windows);

        let cwd = env::current_dir().unwrap();
        let search = engine.search_path();
        assert_eq!(search.dirs()[0], cwd);
        assert_eq!(search.len(), 1);
    }

    #[test]
    fn test_empty_override_does_not_count() {
        let temp = tempdir().unwrap();
        let engine = engine_in(temp.path(), InMemoryChannel::with_value(""));
        assert!(!engine.is_override_active());
        assert_eq!(
            engine.initialize(),
            Resolution::NoCandidateFound { probed: 1 }
        );
    }

    #[test]
    fn test_candidate_rejections() {
        let temp = tempdir().unwrap();
        let engine = engine_in(temp.path(), InMemoryChannel::new());
        let notes = sized_file(temp.path(), "SDL2.txt", 600_000);
        let missing = temp.path().join(WINDOWS_LIB);
        let dir_named_like_lib = temp.path().join("nested.dll");
        std::fs::create_dir(&dir_named_like_lib).unwrap();

        assert_eq!(
            engine.test_candidate(Path::new("")),
            Err(CandidateRejection::EmptyPath)
        );
        assert_eq!(
            engine.test_candidate(&missing),
            Err(CandidateRejection::NotFound(missing.clone()))
        );
        assert_eq!(
            engine.test_candidate(&notes),
            Err(CandidateRejection::WrongExtension {
                path: notes.clone(),
                expected: ".dll"
            })
        );
        assert_eq!(
            engine.test_candidate(&dir_named_like_lib),
            Err(CandidateRejection::NotAFile(dir_named_like_lib.clone()))
        );
    }

    #[test]
    fn test_candidate_accepts_any_size_and_classifies() {
        let temp = tempdir().unwrap();
        let engine = engine_in(temp.path(), InMemoryChannel::new());

        let empty = sized_file(temp.path(), "empty.dll", 0);
        let shim = sized_file(temp.path(), "shim.DLL", 499_999);
        let full = sized_file(temp.path(), "full.dll", 500_000);

        let accepted = engine.test_candidate(&empty).unwrap();
        assert_eq!(accepted.verdict, ClassificationVerdict::CompatibilityShim);

        let accepted = engine.test_candidate(&shim).unwrap();
        assert_eq!(accepted.size, 499_999);
        assert_eq!(accepted.verdict, ClassificationVerdict::CompatibilityShim);

        let accepted = engine.test_candidate(&full).unwrap();
        assert_eq!(accepted.size, 500_000);
        assert_eq!(accepted.verdict, ClassificationVerdict::FullImplementation);
    }

    #[test]
    fn test_custom_classifier_is_used() {
        struct AlwaysFull;
        impl Classifier for AlwaysFull {
            fn classify(&self, _: &LibraryCandidate) -> ClassificationVerdict {
                ClassificationVerdict::FullImplementation
            }
        }

        let temp = tempdir().unwrap();
        let engine = engine_in(temp.path(), InMemoryChannel::new()).with_classifier(AlwaysFull);
        let tiny = sized_file(temp.path(), WINDOWS_LIB, 10);

        let accepted = engine.test_candidate(&tiny).unwrap();
        assert_eq!(accepted.verdict, ClassificationVerdict::FullImplementation);
    }

    #[test]
    fn test_publishes_shim_found_in_base_dir() {
        let temp = tempdir().unwrap();
        let lib = sized_file(temp.path(), WINDOWS_LIB, 300_000);
        let engine = engine_in(temp.path(), InMemoryChannel::new());

        let resolution = engine.initialize();
        assert_eq!(
            resolution,
            Resolution::Published {
                candidate: AcceptedCandidate {
                    path: lib.clone(),
                    size: 300_000,
                    verdict: ClassificationVerdict::CompatibilityShim,
                }
            }
        );
        assert_eq!(resolution.override_path(), Some(lib.as_path()));
        assert_eq!(
            engine.channel().current(),
            Some(lib.to_string_lossy().into_owned())
        );

        let info = engine.describe(&StaticIntrospection::new(LibraryVersion::new(2, 30, 0)));
        assert!(info.override_active);
    }

    #[test]
    fn test_nothing_found_leaves_channel_unset() {
        let temp = tempdir().unwrap();
        let engine = engine_in(temp.path(), InMemoryChannel::new());

        let resolution = engine.initialize();
        assert!(matches!(resolution, Resolution::NoCandidateFound { .. }));
        assert!(resolution.override_path().is_none());
        assert!(engine.channel().current().is_none());

        let info = engine.describe(&StaticIntrospection::new(LibraryVersion::new(2, 30, 0)));
        assert!(!info.override_active);
    }

    #[test]
    fn test_first_match_wins_and_later_candidates_are_not_probed() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        let winner = sized_file(first.path(), WINDOWS_LIB, 600_000);
        let loser = sized_file(second.path(), WINDOWS_LIB, 600_000);

        let probe = RecordingProbe::default();
        let config = ResolverConfig {
            base_dir: Some(first.path().to_path_buf()),
            extra_search_dirs: vec![second.path().to_path_buf()],
            ..ResolverConfig::default()
        };
        let engine = ResolutionEngine::new(config, InMemoryChannel::new(), probe.clone())
            .with_platform(Platform::Windows);

        let resolution = engine.initialize();
        assert_eq!(resolution.override_path(), Some(winner.as_path()));

        let seen = probe.seen.lock().unwrap();
        assert!(seen.contains(&winner));
        assert!(!seen.contains(&loser));
    }

    #[test]
    fn test_publish_failure_moves_on_to_next_candidate() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        sized_file(first.path(), WINDOWS_LIB, 600_000);
        let fallback = sized_file(second.path(), WINDOWS_LIB, 600_000);

        let channel = FlakyChannel {
            inner: InMemoryChannel::new(),
            failures_left: Mutex::new(1),
        };
        let config = ResolverConfig {
            base_dir: Some(first.path().to_path_buf()),
            extra_search_dirs: vec![second.path().to_path_buf()],
            ..ResolverConfig::default()
        };
        let engine =
            ResolutionEngine::new(config, channel, FsProbe).with_platform(Platform::Windows);

        let resolution = engine.initialize();
        assert_eq!(resolution.override_path(), Some(fallback.as_path()));
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let temp = tempdir().unwrap();
        let lib = sized_file(temp.path(), WINDOWS_LIB, 700_000);
        let engine = engine_in(temp.path(), InMemoryChannel::new());

        assert!(engine.initialize().is_published());
        assert_eq!(
            engine.initialize(),
            Resolution::OverridePresent {
                value: lib.to_string_lossy().into_owned()
            }
        );
    }

    #[test]
    fn test_publish_rejects_empty_path() {
        let temp = tempdir().unwrap();
        let engine = engine_in(temp.path(), InMemoryChannel::new());
        assert_eq!(engine.publish(Path::new("")), Err(PublishError::EmptyPath));
        assert!(!engine.is_override_active());
    }

    #[test]
    fn test_describe_reports_introspection_values() {
        let engine = engine_in(
            Path::new("/nonexistent"),
            InMemoryChannel::with_value("/x/SDL2.dll"),
        );
        let introspection = StaticIntrospection::new(LibraryVersion::new(2, 26, 0))
            .with_linked(LibraryVersion::new(2, 30, 8))
            .with_driver("windows");

        let info = engine.describe(&introspection);
        assert_eq!(info.linked_version, Some(LibraryVersion::new(2, 30, 8)));
        assert_eq!(info.active_driver.as_deref(), Some("windows"));
        assert_eq!(info.override_effect(), OverrideEffect::LikelyApplied);
    }

    #[test]
    fn test_resolution_serializes_with_outcome_tag() {
        let value = serde_json::to_value(Resolution::NoCandidateFound { probed: 3 }).unwrap();
        assert_eq!(value["outcome"], "no_candidate_found");
        assert_eq!(value["probed"], 3);
    }
}
