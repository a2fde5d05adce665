//! Runtime adapters for SDL dynamic API resolution.
//!
//! - [`EnvVarChannel`]: publishes through `SDL_DYNAMIC_API`
//! - [`OsFileProbe`]: `std::fs` metadata queries
//! - [`start`]: the one startup sequence that resolves before first use
//! - [`init_tracing`]: subscriber for embedders without their own
//!
//! ```no_run
//! use dynapi_runtime::{engine_from_env, init_tracing, start};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! init_tracing();
//! let engine = engine_from_env()?;
//! let started = start(&engine, |_resolution| {
//!     // First SDL call goes here, e.g. SDL_Init.
//!     Ok::<_, std::io::Error>(())
//! })?;
//! println!("{:?}", started.resolution());
//! # Ok(())
//! # }
//! ```
#![deny(unused_crate_dependencies)]

mod bootstrap;
mod env_channel;
mod fs_probe;
mod logging;
pub mod startup;

pub use bootstrap::{engine_from_config, engine_from_env, load_config};
pub use env_channel::EnvVarChannel;
pub use fs_probe::OsFileProbe;
pub use logging::{DEFAULT_LOG_FILTER, init_tracing, init_tracing_with_default};
pub use startup::{Started, StartupError, library_started, start};
