//! Environment-variable override channel.
//!
//! SDL reads `SDL_DYNAMIC_API` from the process environment on its first
//! call. This is the fallback hand-off for libraries without a programmatic
//! hook.

use std::env;

use dynapi_core::{OverrideChannel, PublishError, SDL_DYNAMIC_API};

use crate::startup;

/// Override channel backed by a process environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVarChannel {
    variable: String,
}

impl EnvVarChannel {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }

    /// The channel SDL itself consults.
    pub fn sdl() -> Self {
        Self::new(SDL_DYNAMIC_API)
    }

    fn check_variable_name(&self) -> Result<(), PublishError> {
        if self.variable.is_empty() || self.variable.contains(['=', '\0']) {
            return Err(PublishError::InvalidValue {
                reason: format!("{:?} is not a valid environment variable name", self.variable),
            });
        }
        Ok(())
    }
}

impl Default for EnvVarChannel {
    fn default() -> Self {
        Self::sdl()
    }
}

impl OverrideChannel for EnvVarChannel {
    fn name(&self) -> &str {
        &self.variable
    }

    fn current(&self) -> Option<String> {
        if self.variable.is_empty() {
            return None;
        }
        env::var_os(&self.variable).map(|value| value.to_string_lossy().into_owned())
    }

    fn publish(&self, value: &str) -> Result<(), PublishError> {
        if value.is_empty() {
            return Err(PublishError::EmptyPath);
        }
        if value.contains('\0') {
            return Err(PublishError::InvalidValue {
                reason: "value contains a NUL byte".to_string(),
            });
        }
        self.check_variable_name()?;
        if startup::library_started() {
            return Err(PublishError::LibraryAlreadyStarted);
        }

        set_process_env(&self.variable, value);
        Ok(())
    }
}

/// # Safety
///
/// `env::set_var` is only sound while no other thread reads or writes the
/// environment. The override is published once, during serialized startup,
/// before the library (or anything else) has spawned threads.
#[allow(unsafe_code)]
fn set_process_env(key: &str, value: &str) {
    // SAFETY: see function docs; startup is single-threaded by contract.
    unsafe { env::set_var(key, value) };
}
