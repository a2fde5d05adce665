//! Filesystem probe over `std::fs`.

use std::fs;
use std::path::Path;

use dynapi_core::{FileFacts, FileProbe};
use tracing::trace;

/// Read-only metadata probe. Follows symlinks, so a `libSDL2.so` link is
/// judged by its target.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileProbe;

impl FileProbe for OsFileProbe {
    fn stat(&self, path: &Path) -> Option<FileFacts> {
        match fs::metadata(path) {
            Ok(metadata) => Some(FileFacts::from(&metadata)),
            Err(e) => {
                trace!(path = %path.display(), error = %e, "stat failed");
                None
            }
        }
    }
}
