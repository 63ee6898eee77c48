//! Operation type domain model.
//!
//! # Invariants
//! - `name` is unique across all operation types (exact, case-sensitive).
//!   Uniqueness is enforced by the service layer, not by storage.

use super::entity::{Entity, EntityId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Named income/expense category referenced by operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationType {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    /// `true` for income categories, `false` for expense categories.
    pub is_income: bool,
}

impl OperationType {
    /// Creates a new operation type with a generated id.
    pub fn new(name: impl Into<String>, is_income: bool) -> Self {
        Self::with_id(Uuid::new_v4(), name, is_income)
    }

    /// Creates an operation type with a caller-provided id.
    pub fn with_id(id: EntityId, name: impl Into<String>, is_income: bool) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            is_income,
        }
    }
}

impl Entity for OperationType {
    fn id(&self) -> EntityId {
        self.id
    }
}
