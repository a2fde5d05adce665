//! Library introspection port.
//!
//! SDL reports the version it was compiled against, the version actually
//! loaded and the active video driver. The latter two are only meaningful once
//! the library's lazy first-use path has run.

use crate::info::LibraryVersion;

/// Port over the embedded library's introspection surface.
pub trait LibraryIntrospection {
    /// Version the embedding code was compiled against.
    fn compiled_version(&self) -> LibraryVersion;

    /// Version of the binary actually servicing calls, once known.
    fn linked_version(&self) -> Option<LibraryVersion>;

    /// Active driver name. `None` before the library has initialised itself.
    fn current_driver(&self) -> Option<String>;
}

/// Introspection values captured by the embedder.
///
/// Embedders query the real library once it is up and record the answers
/// here; before that, only the compiled version is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticIntrospection {
    compiled: LibraryVersion,
    linked: Option<LibraryVersion>,
    driver: Option<String>,
}

impl StaticIntrospection {
    pub const fn new(compiled: LibraryVersion) -> Self {
        Self {
            compiled,
            linked: None,
            driver: None,
        }
    }

    #[must_use]
    pub fn with_linked(mut self, linked: LibraryVersion) -> Self {
        self.linked = Some(linked);
        self
    }

    #[must_use]
    pub fn with_driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = Some(driver.into());
        self
    }
}

impl LibraryIntrospection for StaticIntrospection {
    fn compiled_version(&self) -> LibraryVersion {
        self.compiled
    }

    fn linked_version(&self) -> Option<LibraryVersion> {
        self.linked
    }

    fn current_driver(&self) -> Option<String> {
        self.driver.clone()
    }
}
