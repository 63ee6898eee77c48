//! Transfer shapes for operation types.

use crate::model::entity::EntityId;
use crate::model::operation_type::OperationType;
use serde::{Deserialize, Serialize};

/// Output shape of an operation type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationTypeDto {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub is_income: bool,
}

/// Input shape for creating or updating an operation type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationTypeCreateUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub is_income: bool,
}

impl OperationTypeCreateUpdate {
    /// Maps the shape onto an entity with the given id.
    ///
    /// An absent name maps to an empty one; services reject absent names
    /// before mapping.
    pub fn to_entity(&self, id: EntityId) -> OperationType {
        OperationType {
            id,
            name: self.name.clone().unwrap_or_default(),
            description: self.description.clone(),
            is_income: self.is_income,
        }
    }
}

impl From<OperationType> for OperationTypeDto {
    fn from(value: OperationType) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            is_income: value.is_income,
        }
    }
}
