//! Operation type repository contract and SQLite implementation.
//!
//! # Invariants
//! - Name lookup is exact and case-sensitive.
//! - A missing name is reported as `None`, never as an error.

use super::filter::Filter;
use super::session::Session;
use super::store::{bool_to_db, optional_text, parse_bool, parse_uuid, Record};
use super::{RepoResult, Repository};
use crate::model::operation_type::OperationType;
use rusqlite::types::Value;
use rusqlite::Row;

const NAME_COLUMN: &str = "operation_types.name";

impl Record for OperationType {
    const TABLE: &'static str = "operation_types";
    const COLUMNS: &'static [&'static str] = &["id", "name", "description", "is_income"];

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id.to_string()),
            Value::Text(self.name.clone()),
            optional_text(self.description.as_deref()),
            bool_to_db(self.is_income),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: parse_uuid(row, "id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            is_income: parse_bool(row, "is_income")?,
        })
    }
}

/// Repository interface for operation types.
pub trait OperationTypeRepository: Repository<OperationType> {
    /// Returns the type named exactly `name`, if any.
    fn get_type_by_name(&self, name: &str) -> RepoResult<Option<OperationType>>;
}

/// SQLite-backed operation type repository.
#[derive(Clone)]
pub struct SqliteOperationTypeRepository {
    session: Session,
}

impl SqliteOperationTypeRepository {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl Repository<OperationType> for SqliteOperationTypeRepository {
    fn session(&self) -> &Session {
        &self.session
    }
}

impl OperationTypeRepository for SqliteOperationTypeRepository {
    fn get_type_by_name(&self, name: &str) -> RepoResult<Option<OperationType>> {
        let matches = self.get_by_state(&Filter::eq(NAME_COLUMN, name.to_string()))?;
        Ok(matches.into_iter().next())
    }
}
