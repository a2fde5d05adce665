//! Host platform conventions for shared libraries.
//!
//! Each platform supplies the library file name SDL's own loader would look
//! for, the suffix rule used to validate candidates, and the bounded set of
//! system directories worth probing.

use std::fmt;
use std::path::Path;

/// System library directories probed on Unix-like hosts, in priority order.
pub const UNIX_SYSTEM_LIBRARY_DIRS: &[&str] = &["/usr/lib", "/usr/local/lib"];

/// The host platform, as far as shared-library naming is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    /// Anything else. Uses ELF-style naming but probes no system paths.
    Other,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }

    pub const fn is_unix_like(self) -> bool {
        matches!(self, Self::MacOs | Self::Linux)
    }

    /// File name of the SDL2 shared library on this platform.
    pub const fn library_file_name(self) -> &'static str {
        match self {
            Self::Windows => "SDL2.dll",
            Self::MacOs => "libSDL2.dylib",
            Self::Linux | Self::Other => "libSDL2-2.0.so.0",
        }
    }

    /// Human-readable form of the expected suffix, used in rejections.
    pub const fn extension_label(self) -> &'static str {
        match self {
            Self::Windows => ".dll",
            Self::MacOs => ".dylib",
            Self::Linux | Self::Other => ".so",
        }
    }

    /// Directories appended to the search path after the base directory.
    pub const fn system_library_dirs(self) -> &'static [&'static str] {
        if self.is_unix_like() {
            UNIX_SYSTEM_LIBRARY_DIRS
        } else {
            &[]
        }
    }

    /// Whether `path` carries this platform's shared-library suffix.
    ///
    /// Matching is case-insensitive. ELF platforms also accept a versioned
    /// suffix such as `.so.0` or `.so.0.2800.0`.
    pub fn has_library_extension(self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy().to_lowercase();

        match self {
            Self::Windows => name.ends_with(".dll"),
            Self::MacOs => name.ends_with(".dylib"),
            Self::Linux | Self::Other => name.ends_with(".so") || has_versioned_so_suffix(&name),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// `libfoo.so.2.0.1` style names. The version must start with a digit and
/// hold only digits and dots.
fn has_versioned_so_suffix(name: &str) -> bool {
    let Some(pos) = name.rfind(".so.") else {
        return false;
    };
    let version = &name[pos + 4..];
    version.starts_with(|c: char| c.is_ascii_digit())
        && version.chars().all(|c| c.is_ascii_digit() || c == '.')
}
