//! Predicates for record queries.
//!
//! # Invariants
//! - Column names come from code constants, never from caller input.
//! - Values are always bound as parameters, in clause order.

use super::store::Record;
use crate::model::entity::EntityId;
use rusqlite::types::Value;

/// Conjunction of simple column comparisons.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<String>,
    params: Vec<Value>,
}

impl Filter {
    /// Matches every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches the record of type `E` with `id`.
    pub fn id_eq<E: Record>(id: EntityId) -> Self {
        Self::eq(
            &format!("{}.{}", E::TABLE, E::ID_COLUMN),
            Value::Text(id.to_string()),
        )
    }

    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        Self::compare(column, "=", value.into())
    }

    pub fn ge(column: &str, value: impl Into<Value>) -> Self {
        Self::compare(column, ">=", value.into())
    }

    pub fn le(column: &str, value: impl Into<Value>) -> Self {
        Self::compare(column, "<=", value.into())
    }

    pub fn lt(column: &str, value: impl Into<Value>) -> Self {
        Self::compare(column, "<", value.into())
    }

    /// Combines two filters; both must match.
    pub fn and(mut self, other: Filter) -> Self {
        self.clauses.extend(other.clauses);
        self.params.extend(other.params);
        self
    }

    /// Renders the `WHERE` part, or an empty string for `all()`.
    pub fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            return String::new();
        }
        format!(" WHERE {}", self.clauses.join(" AND "))
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    fn compare(column: &str, op: &str, value: Value) -> Self {
        Self {
            clauses: vec![format!("{column} {op} ?")],
            params: vec![value],
        }
    }
}
