//! Typed record collections over the session connection.
//!
//! # Responsibility
//! - Describe how a record maps to one table (`Record`).
//! - Provide add/update/remove/query/any over any record type (`RecordSet`).
//!
//! # Invariants
//! - Writes run inside the session's open write transaction; they become
//!   durable only after `Session::save_changes`.
//! - The identity column is always the first entry of `Record::COLUMNS`.

use super::filter::Filter;
use super::session::Session;
use super::{RepoError, RepoResult};
use crate::model::entity::{Entity, EntityId};
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Row};
use std::marker::PhantomData;
use uuid::Uuid;

/// Fixed-width so text comparison in SQL follows chronological order.
const DATETIME_DB_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.9f";
const DATETIME_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Mapping between an entity and its table.
pub trait Record: Entity + Sized {
    const TABLE: &'static str;
    const ID_COLUMN: &'static str = "id";
    /// Persisted columns in bind order, identity column first.
    const COLUMNS: &'static [&'static str];

    /// Values to bind, in `COLUMNS` order.
    fn to_values(&self) -> Vec<Value>;

    fn from_row(row: &Row<'_>) -> RepoResult<Self>;
}

/// Typed view over one table of a session.
pub struct RecordSet<'s, E: Record> {
    session: &'s Session,
    _record: PhantomData<fn() -> E>,
}

impl<'s, E: Record> RecordSet<'s, E> {
    pub(crate) fn new(session: &'s Session) -> Self {
        Self {
            session,
            _record: PhantomData,
        }
    }

    /// Inserts one record as a pending change.
    pub fn add(&self, entity: &E) -> RepoResult<()> {
        let placeholders = (1..=E::COLUMNS.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders});",
            E::TABLE,
            E::COLUMNS.join(", ")
        );

        self.session.with_write(|conn| {
            conn.execute(&sql, params_from_iter(entity.to_values()))?;
            Ok(())
        })
    }

    /// Replaces all non-identity columns of one record as a pending change.
    pub fn update(&self, entity: &E) -> RepoResult<()> {
        let assignments = E::COLUMNS
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {assignments} WHERE {} = ?1;",
            E::TABLE,
            E::ID_COLUMN
        );

        self.session.with_write(|conn| {
            let changed = conn.execute(&sql, params_from_iter(entity.to_values()))?;
            if changed == 0 {
                return Err(RepoError::EntityNotFound(entity.id()));
            }
            Ok(())
        })
    }

    /// Deletes one record as a pending change.
    pub fn remove(&self, id: EntityId) -> RepoResult<()> {
        let sql = format!("DELETE FROM {} WHERE {} = ?1;", E::TABLE, E::ID_COLUMN);

        self.session.with_write(|conn| {
            let changed = conn.execute(&sql, [id.to_string()])?;
            if changed == 0 {
                return Err(RepoError::EntityNotFound(id));
            }
            Ok(())
        })
    }

    /// Returns every record matching `filter`, in insertion order.
    pub fn query(&self, filter: &Filter) -> RepoResult<Vec<E>> {
        let sql = format!(
            "SELECT {} FROM {}{} ORDER BY {}.rowid ASC;",
            E::COLUMNS.join(", "),
            E::TABLE,
            filter.where_sql(),
            E::TABLE
        );

        self.session.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(filter.params()))?;
            let mut records = Vec::new();
            while let Some(row) = rows.next()? {
                records.push(E::from_row(row)?);
            }
            Ok(records)
        })
    }

    /// Returns whether at least one record matches `filter`.
    pub fn any(&self, filter: &Filter) -> RepoResult<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {}{});",
            E::TABLE,
            filter.where_sql()
        );

        self.session.with_conn(|conn| {
            let exists: i64 =
                conn.query_row(&sql, params_from_iter(filter.params()), |row| row.get(0))?;
            Ok(exists == 1)
        })
    }
}

pub(crate) fn parse_uuid(row: &Row<'_>, column: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{text}` in {column}")))
}

pub(crate) fn parse_datetime(row: &Row<'_>, column: &str) -> RepoResult<NaiveDateTime> {
    let text: String = row.get(column)?;
    NaiveDateTime::parse_from_str(&text, DATETIME_PARSE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid timestamp value `{text}` in {column}"))
    })
}

pub(crate) fn parse_bool(row: &Row<'_>, column: &str) -> RepoResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

pub(crate) fn datetime_to_db(value: &NaiveDateTime) -> Value {
    Value::Text(value.format(DATETIME_DB_FORMAT).to_string())
}

pub(crate) fn bool_to_db(value: bool) -> Value {
    Value::Integer(if value { 1 } else { 0 })
}

pub(crate) fn optional_text(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |text| Value::Text(text.to_string()))
}
