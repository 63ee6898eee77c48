//! Ledger store bootstrap.
//!
//! Everything above this module assumes a connection that already carries
//! the operation/operation-type schema with foreign keys enforced. `open_db`
//! and `open_db_in_memory` are the only ways such a connection is produced.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Ledger store failure, passed through repositories and services as is.
#[derive(Debug)]
pub enum DbError {
    /// Raised by SQLite, including constraint failures such as deleting a
    /// type that operations still reference.
    Sqlite(rusqlite::Error),
    /// The file was written by a build that knows a later ledger schema.
    SchemaTooNew { found: u32, known: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaTooNew { found, known } => write!(
                f,
                "ledger schema version {found} is newer than this build knows ({known})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
