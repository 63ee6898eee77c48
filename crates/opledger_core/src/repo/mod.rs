//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the generic CRUD contract shared by every record type.
//! - Centralize not-found and absent-entity checks so every repository
//!   reports them the same way.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Every write is committed before the reloaded entity is returned.
//! - Store failures are surfaced as `RepoError::Db` without translation.

use crate::db::DbError;
use crate::model::entity::EntityId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod filter;
pub mod operation_repo;
pub mod operation_type_repo;
pub mod session;
pub mod store;

pub use filter::Filter;
pub use session::Session;
pub use store::{Record, RecordSet};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// A required entity argument was absent.
    NullEntity,
    /// No record with this id exists.
    EntityNotFound(EntityId),
    /// The session was already closed.
    SessionClosed,
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    Db(DbError),
    /// Persisted data cannot be converted to a valid entity.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NullEntity => write!(f, "Entity to set wasn't given."),
            Self::EntityNotFound(id) => write!(f, "Entity with id: {id} not found."),
            Self::SessionClosed => write!(f, "store session is already closed"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Generic CRUD contract over one record type.
///
/// Implementors provide `session`; everything else has a shared default.
/// `get_by_state` is the single read path, so overriding it (for example to
/// eager-load relations) changes every read while keeping the not-found
/// semantics of `get_by_id`, `update` and `delete`.
pub trait Repository<E: Record> {
    /// Unit of work this repository reads from and writes to.
    fn session(&self) -> &Session;

    /// Returns every record matching `filter`.
    fn get_by_state(&self, filter: &Filter) -> RepoResult<Vec<E>> {
        self.session().set::<E>().query(filter)
    }

    fn get_all(&self) -> RepoResult<Vec<E>> {
        self.get_by_state(&Filter::all())
    }

    /// Returns the record with `id`, or `EntityNotFound`.
    fn get_by_id(&self, id: EntityId) -> RepoResult<E> {
        self.get_by_state(&Filter::id_eq::<E>(id))?
            .into_iter()
            .next()
            .ok_or(RepoError::EntityNotFound(id))
    }

    /// Persists a new record, commits, and returns it reloaded.
    fn create(&self, entity: Option<E>) -> RepoResult<E> {
        let entity = entity.ok_or(RepoError::NullEntity)?;
        self.session().set::<E>().add(&entity)?;
        self.save_changes()?;
        self.get_by_id(entity.id())
    }

    /// Replaces an existing record, commits, and returns it reloaded.
    fn update(&self, entity: Option<E>) -> RepoResult<E> {
        let entity = entity.ok_or(RepoError::NullEntity)?;
        let id = entity.id();
        if !self.exists(id)? {
            return Err(RepoError::EntityNotFound(id));
        }

        self.session().set::<E>().update(&entity)?;
        self.save_changes()?;
        self.get_by_id(id)
    }

    /// Removes the record with `id` and commits.
    fn delete(&self, id: EntityId) -> RepoResult<()> {
        let entity = self.get_by_id(id)?;
        self.session().set::<E>().remove(entity.id())?;
        self.save_changes()
    }

    /// Returns whether a record with `id` is present.
    fn exists(&self, id: EntityId) -> RepoResult<bool> {
        self.session().set::<E>().any(&Filter::id_eq::<E>(id))
    }

    /// Commits pending writes of the shared session.
    fn save_changes(&self) -> RepoResult<()> {
        self.session().save_changes()
    }

    /// Releases the shared session. Repeated calls are no-ops.
    fn dispose(&self) -> RepoResult<()> {
        self.session().close()
    }
}
