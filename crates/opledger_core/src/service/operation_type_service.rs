//! Operation type use-case service.
//!
//! # Invariants
//! - Type names are unique (exact match) across all operation types.
//! - The uniqueness check on update also matches the record being updated,
//!   so re-saving a type under its current name is rejected.

use super::{EntityService, ServiceError, ServiceResult, TypeRef};
use crate::dto::operation_type::{OperationTypeCreateUpdate, OperationTypeDto};
use crate::model::entity::EntityId;
use crate::model::operation_type::OperationType;
use crate::repo::operation_type_repo::OperationTypeRepository;
use log::{info, warn};
use uuid::Uuid;

/// Use-case service for operation types.
pub struct OperationTypeService<R: OperationTypeRepository> {
    repo: R,
}

impl<R: OperationTypeRepository> OperationTypeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a new operation type with a unique name.
    ///
    /// # Errors
    /// - `NullEntity` when the shape or its name is absent.
    /// - `DuplicateEntity` when a type with the same name exists.
    pub fn create_operation_type(
        &self,
        dto: Option<OperationTypeCreateUpdate>,
    ) -> ServiceResult<OperationTypeDto> {
        let dto = dto.ok_or(ServiceError::NullEntity)?;
        let name = dto.name.as_deref().ok_or(ServiceError::NullEntity)?;
        self.ensure_unique_name(name)?;

        let created = self.repo.create(Some(dto.to_entity(Uuid::new_v4())))?;
        info!(
            "event=operation_type_create module=service status=ok id={} is_income={}",
            created.id, created.is_income
        );
        Ok(created.into())
    }

    /// Replaces the operation type with `id`.
    ///
    /// # Errors
    /// - `UnknownType` when no type with `id` exists.
    /// - `NullEntity` when the shape or its name is absent.
    /// - `DuplicateEntity` when any type, including this one, has the name.
    pub fn update_operation_type(
        &self,
        id: EntityId,
        dto: Option<OperationTypeCreateUpdate>,
    ) -> ServiceResult<OperationTypeDto> {
        if !self.repo.exists(id)? {
            return Err(ServiceError::UnknownType(TypeRef::Id(id)));
        }

        let dto = dto.ok_or(ServiceError::NullEntity)?;
        let name = dto.name.as_deref().ok_or(ServiceError::NullEntity)?;
        self.ensure_unique_name(name)?;

        let updated = self.repo.update(Some(dto.to_entity(id)))?;
        info!("event=operation_type_update module=service status=ok id={id}");
        Ok(updated.into())
    }

    fn ensure_unique_name(&self, name: &str) -> ServiceResult<()> {
        if let Some(existing) = self.repo.get_type_by_name(name)? {
            warn!(
                "event=operation_type_write module=service status=rejected reason=duplicate_name existing_id={}",
                existing.id
            );
            return Err(ServiceError::DuplicateEntity(name.to_string()));
        }
        Ok(())
    }
}

impl<R: OperationTypeRepository> EntityService for OperationTypeService<R> {
    type Entity = OperationType;
    type Dto = OperationTypeDto;
    type Repo = R;

    fn repository(&self) -> &R {
        &self.repo
    }
}
