//! Operation use-case service.
//!
//! # Responsibility
//! - Resolve the caller's type name to a stored operation type.
//! - Validate operation shapes before persistence.
//! - Expose date and period queries as transfer shapes.
//!
//! # Invariants
//! - Type resolution runs before field validation.
//! - The unknown-type error carries the type name exactly as given.

use super::{EntityService, ServiceError, ServiceResult, TypeRef};
use crate::dto::operation::{OperationCreateUpdate, OperationDto};
use crate::model::entity::EntityId;
use crate::model::operation::Operation;
use crate::model::operation_type::OperationType;
use crate::repo::operation_repo::OperationRepository;
use crate::repo::operation_type_repo::OperationTypeRepository;
use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};
use uuid::Uuid;
use validator::Validate;

/// Use-case service for operations.
pub struct OperationService<O, T>
where
    O: OperationRepository,
    T: OperationTypeRepository,
{
    operations: O,
    types: T,
}

impl<O, T> OperationService<O, T>
where
    O: OperationRepository,
    T: OperationTypeRepository,
{
    pub fn new(operations: O, types: T) -> Self {
        Self { operations, types }
    }

    /// Creates an operation under the type named by `dto.type_name`.
    ///
    /// # Errors
    /// - `NullEntity` when the shape is absent.
    /// - `UnknownType` when no type has the given name.
    /// - `Validation` with every violated field constraint.
    pub fn create_operation(
        &self,
        dto: Option<OperationCreateUpdate>,
    ) -> ServiceResult<OperationDto> {
        let dto = dto.ok_or(ServiceError::NullEntity)?;
        let kind = self.resolve_type(dto.type_name.as_deref())?;
        validate(&dto)?;

        let created = self
            .operations
            .create(Some(dto.to_entity(Uuid::new_v4(), kind.id)))?;
        info!(
            "event=operation_create module=service status=ok id={} type_id={}",
            created.id, created.type_id
        );
        Ok(created.into())
    }

    /// Replaces the operation with `id`.
    ///
    /// # Errors
    /// - `NullEntity` when the shape is absent.
    /// - `UnknownType` when no type has the given name.
    /// - `EntityNotFound` when no operation with `id` exists.
    /// - `Validation` with every violated field constraint.
    pub fn update_operation(
        &self,
        id: EntityId,
        dto: Option<OperationCreateUpdate>,
    ) -> ServiceResult<OperationDto> {
        let dto = dto.ok_or(ServiceError::NullEntity)?;
        let kind = self.resolve_type(dto.type_name.as_deref())?;
        if !self.operations.exists(id)? {
            return Err(ServiceError::EntityNotFound(id));
        }
        validate(&dto)?;

        let updated = self.operations.update(Some(dto.to_entity(id, kind.id)))?;
        info!(
            "event=operation_update module=service status=ok id={id} type_id={}",
            updated.type_id
        );
        Ok(updated.into())
    }

    /// Operations created on `date`.
    pub fn get_for_date(&self, date: NaiveDate) -> ServiceResult<Vec<OperationDto>> {
        let operations = self.operations.get_for_date(date)?;
        Ok(operations.into_iter().map(Self::map_to_dto).collect())
    }

    /// Operations created within `[start, end]`.
    pub fn get_for_period(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> ServiceResult<Vec<OperationDto>> {
        let operations = self.operations.get_for_period(start, end)?;
        Ok(operations.into_iter().map(Self::map_to_dto).collect())
    }

    fn resolve_type(&self, type_name: Option<&str>) -> ServiceResult<OperationType> {
        let found = match type_name {
            Some(name) => self.types.get_type_by_name(name)?,
            None => None,
        };

        found.ok_or_else(|| {
            warn!("event=operation_write module=service status=rejected reason=unknown_type");
            ServiceError::UnknownType(TypeRef::Name(type_name.unwrap_or_default().to_string()))
        })
    }
}

impl<O, T> EntityService for OperationService<O, T>
where
    O: OperationRepository,
    T: OperationTypeRepository,
{
    type Entity = Operation;
    type Dto = OperationDto;
    type Repo = O;

    fn repository(&self) -> &O {
        &self.operations
    }
}

fn validate(dto: &OperationCreateUpdate) -> ServiceResult<()> {
    dto.validate().map_err(|err| {
        warn!(
            "event=operation_write module=service status=rejected reason=validation violations={}",
            err.field_errors().len()
        );
        ServiceError::from(err)
    })
}
