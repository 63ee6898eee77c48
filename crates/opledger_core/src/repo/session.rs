//! Store session: the unit of work shared by repositories.
//!
//! # Responsibility
//! - Own the SQLite connection for the lifetime of a repository group.
//! - Open a write transaction lazily and commit it on `save_changes`.
//! - Release the connection exactly once.
//!
//! # Invariants
//! - Handles are cheap clones of one shared session.
//! - `close` and `Drop` share a single release path guarded by taking the
//!   connection out of its slot; a second release is impossible.
//! - Uncommitted writes are rolled back on release.

use super::store::{Record, RecordSet};
use super::{RepoError, RepoResult};
use crate::db::migrations::{latest_version, schema_version};
use crate::db::{open_db, open_db_in_memory};
use log::{debug, info, warn};
use rusqlite::Connection;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Shared handle to one store session.
#[derive(Clone)]
pub struct Session {
    inner: Rc<SessionInner>,
}

struct SessionInner {
    conn: RefCell<Option<Connection>>,
}

impl Session {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema is not at the latest version.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        let actual_version = schema_version(&conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        Ok(Self {
            inner: Rc::new(SessionInner {
                conn: RefCell::new(Some(conn)),
            }),
        })
    }

    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens (and migrates) a private in-memory database.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    /// Typed collection for record type `E`.
    pub fn set<E: Record>(&self) -> RecordSet<'_, E> {
        RecordSet::new(self)
    }

    /// Commits pending writes. A no-op when nothing is pending.
    pub fn save_changes(&self) -> RepoResult<()> {
        self.with_conn(|conn| {
            if !conn.is_autocommit() {
                conn.execute_batch("COMMIT;")?;
            }
            Ok(())
        })
    }

    /// Returns whether writes are waiting for `save_changes`.
    pub fn has_pending_changes(&self) -> bool {
        self.inner
            .conn
            .borrow()
            .as_ref()
            .is_some_and(|conn| !conn.is_autocommit())
    }

    pub fn is_closed(&self) -> bool {
        self.inner.conn.borrow().is_none()
    }

    /// Releases the connection. Calling it again is a no-op.
    pub fn close(&self) -> RepoResult<()> {
        let conn = self.inner.conn.borrow_mut().take();
        match conn {
            Some(conn) => release(conn),
            None => {
                debug!("event=session_close module=repo status=skipped reason=already_closed");
                Ok(())
            }
        }
    }

    /// Runs `f` against the open connection.
    pub(crate) fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let slot = self.inner.conn.borrow();
        let conn = slot.as_ref().ok_or(RepoError::SessionClosed)?;
        f(conn)
    }

    /// Runs `f` inside the session write transaction, opening it if needed.
    ///
    /// A failed write is undone before its error is returned: the whole
    /// transaction when this call opened it, otherwise only the write itself,
    /// so earlier pending writes survive and no lock outlives the failure.
    pub(crate) fn with_write<T>(
        &self,
        f: impl FnOnce(&Connection) -> RepoResult<T>,
    ) -> RepoResult<T> {
        self.with_conn(|conn| {
            let opened = conn.is_autocommit();
            if opened {
                conn.execute_batch("BEGIN IMMEDIATE;")?;
            }
            conn.execute_batch("SAVEPOINT session_write;")?;

            match f(conn) {
                Ok(value) => {
                    conn.execute_batch("RELEASE session_write;")?;
                    Ok(value)
                }
                Err(err) => {
                    let undo = if opened {
                        "ROLLBACK;"
                    } else {
                        "ROLLBACK TO session_write; RELEASE session_write;"
                    };
                    match conn.execute_batch(undo) {
                        Ok(()) => debug!(
                            "event=session_write module=repo status=rolled_back scope={}",
                            if opened { "transaction" } else { "write" }
                        ),
                        Err(undo_err) => warn!(
                            "event=session_write module=repo status=error stage=rollback error={undo_err}"
                        ),
                    }
                    Err(err)
                }
            }
        })
    }
}

impl Drop for SessionInner {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.get_mut().take() {
            if let Err(err) = release(conn) {
                warn!("event=session_close module=repo status=error trigger=drop error={err}");
            }
        }
    }
}

fn release(conn: Connection) -> RepoResult<()> {
    let mut rolled_back = false;
    if !conn.is_autocommit() {
        conn.execute_batch("ROLLBACK;")?;
        rolled_back = true;
    }

    conn.close().map_err(|(_, err)| RepoError::from(err))?;
    info!("event=session_close module=repo status=ok rolled_back={rolled_back}");
    Ok(())
}
