//! Search path discovery.
//!
//! Produces the ordered list of directories to probe for the library. Order
//! defines priority. The set is kept deliberately small: the base directory,
//! the standard system library directories on Unix-like hosts, and whatever
//! the configuration adds explicitly.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::platform::Platform;
use crate::ports::FileProbe;

/// Ordered, deduplicated set of existing directories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Discover the search path for `platform`.
    ///
    /// Resolution order:
    /// 1. `base_dir` (the working or executable directory)
    /// 2. Platform system library directories
    /// 3. `extra_dirs`, in the order given
    ///
    /// Every entry is checked for existence through `probe` before it is
    /// added; nonexistent directories never appear in the result.
    pub fn discover(
        platform: Platform,
        base_dir: Option<&Path>,
        extra_dirs: &[PathBuf],
        probe: &dyn FileProbe,
    ) -> Self {
        let system_dirs = platform.system_library_dirs().iter().map(Path::new);
        let requested = base_dir
            .into_iter()
            .chain(system_dirs)
            .chain(extra_dirs.iter().map(PathBuf::as_path));

        let mut search_path = Self::default();
        for dir in requested {
            if search_path.contains(dir) {
                continue;
            }
            if probe.stat(dir).is_some_and(|facts| facts.is_dir()) {
                search_path.dirs.push(dir.to_path_buf());
            } else {
                debug!(dir = %dir.display(), "Skipping missing search directory");
            }
        }

        debug!(
            platform = %platform,
            dirs = search_path.dirs.len(),
            "Discovered library search path"
        );
        search_path
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.dirs.iter().any(|d| d == dir)
    }

    /// Candidate file paths: each directory joined with `file_name`.
    pub fn candidates<'a>(&'a self, file_name: &'a str) -> impl Iterator<Item = PathBuf> + 'a {
        self.dirs.iter().map(move |dir| dir.join(file_name))
    }
}

impl<'a> IntoIterator for &'a SearchPath {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.dirs.iter()
    }
}
