//! Port definitions.
//!
//! The engine talks to the outside world only through these traits:
//! - [`OverrideChannel`]: where the chosen path is published
//! - [`FileProbe`]: existence and size queries
//! - [`LibraryIntrospection`]: what the loaded library reports about itself
//!
//! Core owns the traits and the pure implementations; OS-backed adapters
//! live in `dynapi-runtime`.

mod channel;
mod file_probe;
mod introspection;

pub use channel::{InMemoryChannel, OverrideChannel, SDL_DYNAMIC_API};
#[cfg(test)]
pub use file_probe::MockFileProbe;
pub use file_probe::{EntryKind, FileFacts, FileProbe};
pub use introspection::{LibraryIntrospection, StaticIntrospection};
