//! Startup sequencing.
//!
//! SDL reads the override channel exactly once, on its first function call.
//! [`start`] is the single place where resolution and that first call happen,
//! in that order. The library handle is only reachable through [`Started`],
//! so nothing can touch the library before the override is committed.

use std::error::Error as StdError;
use std::sync::atomic::{AtomicU8, Ordering};

use dynapi_core::{LibraryInfo, LibraryIntrospection, Resolution, ResolutionEngine};
use thiserror::Error;
use tracing::{debug, warn};

const UNRESOLVED: u8 = 0;
const RESOLVING: u8 = 1;
const STARTED: u8 = 2;

static STATE: AtomicU8 = AtomicU8::new(UNRESOLVED);

/// Errors from [`start`].
#[derive(Debug, Error)]
pub enum StartupError {
    /// `start` already ran in this process.
    #[error("Library startup already ran in this process")]
    AlreadyStarted,

    /// The embedder's first library call failed.
    #[error("Library initialization failed: {0}")]
    Init(#[source] Box<dyn StdError + Send + Sync>),
}

/// True once [`start`] has handed control to the library.
///
/// Publishing any override after this point has no effect.
pub fn library_started() -> bool {
    STATE.load(Ordering::SeqCst) == STARTED
}

/// A library that was started after its override was resolved.
#[derive(Debug)]
pub struct Started<L> {
    resolution: Resolution,
    library: L,
}

impl<L> Started<L> {
    pub const fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    pub const fn library(&self) -> &L {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut L {
        &mut self.library
    }

    pub fn into_parts(self) -> (Resolution, L) {
        (self.resolution, self.library)
    }
}

impl<L: LibraryIntrospection> Started<L> {
    /// Introspection snapshot from the running library.
    pub fn describe(&self, engine: &ResolutionEngine) -> LibraryInfo {
        engine.describe(&self.library)
    }
}

/// Resolve the override, then perform the library's first call.
///
/// `init` receives the [`Resolution`] so libraries with a programmatic hook
/// can take the path directly. Runs at most once per process; the gate
/// closes before `init` is called, whether or not it succeeds.
pub fn start<L, E, F>(engine: &ResolutionEngine, init: F) -> Result<Started<L>, StartupError>
where
    F: FnOnce(&Resolution) -> Result<L, E>,
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    if STATE
        .compare_exchange(UNRESOLVED, RESOLVING, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(StartupError::AlreadyStarted);
    }

    let resolution = engine.initialize();
    if let Resolution::NoCandidateFound { probed } = resolution {
        warn!(
            probed,
            file = engine.expected_file_name(),
            "No library override found, the platform default will be used"
        );
    }

    STATE.store(STARTED, Ordering::SeqCst);
    debug!("Override committed, performing first library call");

    let library = init(&resolution).map_err(|e| StartupError::Init(e.into()))?;
    Ok(Started {
        resolution,
        library,
    })
}
