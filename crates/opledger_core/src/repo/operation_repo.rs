//! Operation repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide date and period lookups over operations.
//! - Load the related operation type in the same query as the operation.
//!
//! # Invariants
//! - Every operation returned by this repository has `operation_type` set
//!   when the referenced type row exists.
//! - Period bounds are inclusive on both ends.

use super::filter::Filter;
use super::session::Session;
use super::store::{
    datetime_to_db, optional_text, parse_bool, parse_datetime, parse_uuid, Record,
};
use super::{RepoResult, Repository};
use crate::model::operation::Operation;
use crate::model::operation_type::OperationType;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Row};

const CREATED_COLUMN: &str = "operations.created";

const OPERATION_WITH_TYPE_SELECT_SQL: &str = "SELECT
    operations.id AS id,
    operations.name AS name,
    operations.amount AS amount,
    operations.created AS created,
    operations.description AS description,
    operations.type_id AS type_id,
    operation_types.name AS type_name,
    operation_types.description AS type_description,
    operation_types.is_income AS type_is_income
FROM operations
LEFT JOIN operation_types ON operation_types.id = operations.type_id";

impl Record for Operation {
    const TABLE: &'static str = "operations";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "amount",
        "created",
        "description",
        "type_id",
    ];

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id.to_string()),
            Value::Text(self.name.clone()),
            Value::Integer(i64::from(self.amount)),
            datetime_to_db(&self.created),
            optional_text(self.description.as_deref()),
            Value::Text(self.type_id.to_string()),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: parse_uuid(row, "id")?,
            name: row.get("name")?,
            amount: row.get("amount")?,
            created: parse_datetime(row, "created")?,
            description: row.get("description")?,
            type_id: parse_uuid(row, "type_id")?,
            operation_type: None,
        })
    }
}

/// Repository interface for operations.
pub trait OperationRepository: Repository<Operation> {
    /// Returns operations created on `date` (any time of day).
    fn get_for_date(&self, date: NaiveDate) -> RepoResult<Vec<Operation>>;

    /// Returns operations created within `[start, end]`.
    fn get_for_period(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> RepoResult<Vec<Operation>>;
}

/// SQLite-backed operation repository with eager type loading.
#[derive(Clone)]
pub struct SqliteOperationRepository {
    session: Session,
}

impl SqliteOperationRepository {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl Repository<Operation> for SqliteOperationRepository {
    fn session(&self) -> &Session {
        &self.session
    }

    fn get_by_state(&self, filter: &Filter) -> RepoResult<Vec<Operation>> {
        let sql = format!(
            "{OPERATION_WITH_TYPE_SELECT_SQL}{} ORDER BY operations.created ASC, operations.id ASC;",
            filter.where_sql()
        );

        self.session.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(filter.params()))?;
            let mut operations = Vec::new();
            while let Some(row) = rows.next()? {
                operations.push(parse_operation_with_type(row)?);
            }
            Ok(operations)
        })
    }
}

impl OperationRepository for SqliteOperationRepository {
    fn get_for_date(&self, date: NaiveDate) -> RepoResult<Vec<Operation>> {
        let day_start = date.and_time(NaiveTime::default());
        let mut filter = Filter::ge(CREATED_COLUMN, datetime_to_db(&day_start));
        if let Some(next_day) = date.succ_opt() {
            let next_day_start = next_day.and_time(NaiveTime::default());
            filter = filter.and(Filter::lt(CREATED_COLUMN, datetime_to_db(&next_day_start)));
        }
        self.get_by_state(&filter)
    }

    fn get_for_period(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> RepoResult<Vec<Operation>> {
        if start > end {
            return Ok(Vec::new());
        }

        let filter = Filter::ge(CREATED_COLUMN, datetime_to_db(&start))
            .and(Filter::le(CREATED_COLUMN, datetime_to_db(&end)));
        self.get_by_state(&filter)
    }
}

fn parse_operation_with_type(row: &Row<'_>) -> RepoResult<Operation> {
    let mut operation = Operation::from_row(row)?;
    operation.operation_type = match row.get::<_, Option<String>>("type_name")? {
        Some(name) => Some(OperationType {
            id: operation.type_id,
            name,
            description: row.get("type_description")?,
            is_income: parse_bool(row, "type_is_income")?,
        }),
        None => None,
    };
    Ok(operation)
}
