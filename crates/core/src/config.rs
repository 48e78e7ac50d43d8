//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the store and
//! services. Request handling never reads process-wide environment variables.

use crate::constants::{DEFAULT_DATABASE_PATH, IN_MEMORY_DATABASE};
use crate::{OrdoError, OrdoResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    database_path: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`OrdoError::InvalidInput`] if `database_path` is empty.
    pub fn new(database_path: PathBuf) -> OrdoResult<Self> {
        if database_path.as_os_str().is_empty() {
            return Err(OrdoError::InvalidInput(
                "database path cannot be empty".into(),
            ));
        }

        Ok(Self { database_path })
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    /// Whether the configured database lives only in memory.
    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY_DATABASE)
    }
}

/// Resolve the database path from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_DATABASE_PATH`].
pub fn database_path_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH))
}
