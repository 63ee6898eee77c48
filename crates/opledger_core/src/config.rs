//! Runtime configuration for embedding callers.
//!
//! Values come from environment variables; empty values count as unset.
//!
//! | Variable             | Meaning                           | Default               |
//! |----------------------|-----------------------------------|-----------------------|
//! | `OPLEDGER_DB`        | SQLite database file              | private in-memory db  |
//! | `OPLEDGER_LOG_LEVEL` | one of trace, debug, info, warn, error | build-mode default    |
//! | `OPLEDGER_LOG_DIR`   | absolute directory for log files  | logging disabled      |

use crate::logging::{default_log_level, init_logging, LoggingError};
use crate::repo::{RepoResult, Session};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "OPLEDGER_DB";
pub const LOG_LEVEL_ENV: &str = "OPLEDGER_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "OPLEDGER_LOG_DIR";

/// Store and logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// `None` selects an in-memory database.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// `None` leaves file logging off.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: read(DB_PATH_ENV).map(PathBuf::from),
            log_level: read(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns whether logging is active afterwards.
    pub fn init_logging(&self) -> Result<bool, LoggingError> {
        match &self.log_dir {
            Some(dir) => init_logging(&self.log_level, dir).map(|()| true),
            None => Ok(false),
        }
    }

    /// Opens a session on the configured store.
    pub fn open_session(&self) -> RepoResult<Session> {
        match &self.db_path {
            Some(path) => Session::open(path),
            None => Session::open_in_memory(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        let config = CoreConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, CoreConfig::default());
        assert!(!config.init_logging().unwrap());
    }

    #[test]
    fn variables_are_trimmed_and_empty_values_ignored() {
        let config = CoreConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, " /tmp/ledger.db "),
            (LOG_LEVEL_ENV, "warn"),
            (LOG_DIR_ENV, "   "),
        ]));

        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/ledger.db")));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn open_session_uses_file_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");
        let config = CoreConfig {
            db_path: Some(path.clone()),
            ..CoreConfig::default()
        };

        let session = config.open_session().unwrap();
        assert!(path.exists());
        session.close().unwrap();
    }
}
