//! Transfer shapes for operations.
//!
//! # Invariants
//! - `OperationDto::type_name` is derived from the related type's name and
//!   serialized as `type`.
//! - `OperationCreateUpdate` field constraints are declared with `validator`
//!   attributes; `validate` reports every violated field at once.

use crate::model::entity::EntityId;
use crate::model::operation::Operation;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Output shape of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDto {
    pub id: EntityId,
    pub name: String,
    pub amount: i32,
    pub created: NaiveDateTime,
    pub description: Option<String>,
    pub type_id: EntityId,
    /// Name of the related operation type. Empty when the relation was not loaded.
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Input shape for creating or updating an operation.
///
/// `type_name` is resolved against stored types by the service before
/// validation runs, so it carries no constraint here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OperationCreateUpdate {
    #[validate(required(message = "The name field is required."))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1, message = "Amount must be greater than zero"))]
    pub amount: i32,
    #[validate(required(message = "The created field is required."))]
    pub created: Option<NaiveDateTime>,
    pub description: Option<String>,
    pub type_name: Option<String>,
}

impl OperationCreateUpdate {
    /// Maps the shape onto an entity. Call after `validate` succeeded.
    pub fn to_entity(&self, id: EntityId, type_id: EntityId) -> Operation {
        Operation {
            id,
            name: self.name.clone().unwrap_or_default(),
            amount: self.amount,
            created: self.created.unwrap_or_default(),
            description: self.description.clone(),
            type_id,
            operation_type: None,
        }
    }
}

impl From<Operation> for OperationDto {
    fn from(value: Operation) -> Self {
        let type_name = value
            .operation_type
            .map(|kind| kind.name)
            .unwrap_or_default();
        Self {
            id: value.id,
            name: value.name,
            amount: value.amount,
            created: value.created,
            description: value.description,
            type_id: value.type_id,
            type_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{OperationCreateUpdate, OperationDto};
    use crate::model::operation::Operation;
    use crate::model::operation_type::OperationType;
    use chrono::NaiveDate;
    use validator::Validate;

    fn noon(year: i32, month: u32, day: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    #[test]
    fn validate_aggregates_missing_name_and_non_positive_amount() {
        let input = OperationCreateUpdate {
            name: None,
            amount: 0,
            created: Some(noon(2022, 12, 20)),
            description: None,
            type_name: Some("Incomes".to_string()),
        };

        let err = input.validate().unwrap_err();
        let fields = err.field_errors();
        assert_eq!(fields.len(), 2);
        assert!(fields.contains_key("name"));
        assert_eq!(
            fields["amount"][0].message.as_deref(),
            Some("Amount must be greater than zero")
        );
    }

    #[test]
    fn validate_accepts_empty_name_and_minimal_amount() {
        let input = OperationCreateUpdate {
            name: Some(String::new()),
            amount: 1,
            created: Some(noon(2022, 12, 20)),
            description: Some(String::new()),
            type_name: Some("Incomes".to_string()),
        };

        assert!(input.validate().is_ok());
    }

    #[test]
    fn validate_requires_created() {
        let input = OperationCreateUpdate {
            name: Some("salary".to_string()),
            amount: 10,
            ..OperationCreateUpdate::default()
        };

        let err = input.validate().unwrap_err();
        let fields = err.field_errors();
        assert_eq!(fields.len(), 1);
        assert_eq!(
            fields["created"][0].message.as_deref(),
            Some("The created field is required.")
        );
    }

    #[test]
    fn dto_takes_type_name_from_loaded_relation() {
        let kind = OperationType::new("Salary", true);
        let mut operation = Operation::new("march", 1500, noon(2023, 3, 1), kind.id);
        operation.operation_type = Some(kind.clone());

        let dto = OperationDto::from(operation);
        assert_eq!(dto.type_name, "Salary");
        assert_eq!(dto.type_id, kind.id);

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["type"], "Salary");
    }
}
