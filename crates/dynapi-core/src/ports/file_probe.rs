//! Filesystem probe port.
//!
//! Discovery and candidate validation only ever ask two questions of the
//! filesystem: does this exist, and how big is it. Routing both through one
//! port keeps the engine pure and lets tests count every probe.

use std::fs::Metadata;
use std::path::Path;

/// Kind of filesystem entry, after following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// Metadata facts the engine needs about a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFacts {
    pub kind: EntryKind,
    /// Size in bytes.
    pub len: u64,
}

impl FileFacts {
    pub const fn file(len: u64) -> Self {
        Self {
            kind: EntryKind::File,
            len,
        }
    }

    pub const fn directory() -> Self {
        Self {
            kind: EntryKind::Directory,
            len: 0,
        }
    }

    pub const fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    pub const fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File)
    }
}

impl From<&Metadata> for FileFacts {
    fn from(metadata: &Metadata) -> Self {
        let kind = if metadata.is_file() {
            EntryKind::File
        } else if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::Other
        };
        Self {
            kind,
            len: metadata.len(),
        }
    }
}

/// Port for synchronous, read-only metadata queries.
#[cfg_attr(test, mockall::automock)]
pub trait FileProbe: Send + Sync {
    /// Metadata for `path`, or `None` if it does not exist or cannot be read.
    fn stat(&self, path: &Path) -> Option<FileFacts>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sized_file;
    use tempfile::tempdir;

    #[test]
    fn test_facts_from_metadata() {
        let temp = tempdir().unwrap();
        let lib = sized_file(temp.path(), "SDL2.dll", 300_000);

        let file = std::fs::metadata(&lib).unwrap();
        assert_eq!(FileFacts::from(&file), FileFacts::file(300_000));

        let dir = std::fs::metadata(temp.path()).unwrap();
        assert!(FileFacts::from(&dir).is_dir());
    }
}
