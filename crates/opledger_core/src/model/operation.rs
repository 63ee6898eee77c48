//! Operation domain model.
//!
//! # Responsibility
//! - Describe one income/expense record.
//! - Carry the eagerly loaded operation type for read paths.
//!
//! # Invariants
//! - `type_id` must reference an existing operation type on write.
//! - `operation_type` is never persisted; repositories populate it on read.

use super::entity::{Entity, EntityId};
use super::operation_type::OperationType;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Single income/expense record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub id: EntityId,
    pub name: String,
    /// Positive amount in minor units of the ledger currency.
    pub amount: i32,
    pub created: NaiveDateTime,
    pub description: Option<String>,
    pub type_id: EntityId,
    /// Related type, loaded together with the operation.
    #[serde(skip)]
    pub operation_type: Option<OperationType>,
}

impl Operation {
    /// Creates a new operation with a generated id and no loaded relation.
    pub fn new(
        name: impl Into<String>,
        amount: i32,
        created: NaiveDateTime,
        type_id: EntityId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            created,
            description: None,
            type_id,
            operation_type: None,
        }
    }

    /// Returns the related type name when the relation is loaded.
    pub fn type_name(&self) -> Option<&str> {
        self.operation_type.as_ref().map(|kind| kind.name.as_str())
    }
}

impl Entity for Operation {
    fn id(&self) -> EntityId {
        self.id
    }
}
