//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Map persisted entities to transfer shapes.
//! - Own the business rules: type name uniqueness, type resolution, and
//!   field validation before persistence.
//!
//! # Invariants
//! - Failures propagate unchanged; nothing is retried or defaulted.
//! - Service layer remains storage-agnostic.

use crate::model::entity::EntityId;
use crate::repo::{Record, RepoError, Repository};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use validator::ValidationErrors;

pub mod operation_service;
pub mod operation_type_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// How a missing operation type was referenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Id(EntityId),
    /// Raw name as given by the caller, untrimmed.
    Name(String),
}

/// Service error for ledger use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// A required transfer shape or field was absent.
    NullEntity,
    /// No record with this id exists.
    EntityNotFound(EntityId),
    /// The referenced operation type does not exist.
    UnknownType(TypeRef),
    /// An operation type with this name already exists.
    DuplicateEntity(String),
    /// One or more declared field constraints failed, keyed by field.
    Validation(ValidationErrors),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NullEntity => write!(f, "Entity to set wasn't given."),
            Self::EntityNotFound(id) => write!(f, "Entity with id: {id} not found."),
            Self::UnknownType(TypeRef::Id(id)) => {
                write!(f, "Operation type with id {id} doesn't exist.")
            }
            Self::UnknownType(TypeRef::Name(name)) => {
                write!(f, "Operation type with name ' {name} ' doesn't exist.")
            }
            Self::DuplicateEntity(name) => {
                write!(f, "Operation type with name {name} already exists.")
            }
            Self::Validation(err) => {
                write!(f, "One or more validation errors occurred: {err}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NullEntity => Self::NullEntity,
            RepoError::EntityNotFound(id) => Self::EntityNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

/// Pass-through reads and deletes shared by every entity service.
///
/// No business rules live here.
pub trait EntityService {
    type Entity: Record;
    type Dto: From<Self::Entity>;
    type Repo: Repository<Self::Entity>;

    fn repository(&self) -> &Self::Repo;

    fn map_to_dto(entity: Self::Entity) -> Self::Dto {
        <Self::Dto as From<Self::Entity>>::from(entity)
    }

    fn get_all(&self) -> ServiceResult<Vec<Self::Dto>> {
        let entities = self.repository().get_all()?;
        Ok(entities.into_iter().map(Self::map_to_dto).collect())
    }

    fn get_by_id(&self, id: EntityId) -> ServiceResult<Self::Dto> {
        let entity = self.repository().get_by_id(id)?;
        Ok(Self::map_to_dto(entity))
    }

    fn delete(&self, id: EntityId) -> ServiceResult<()> {
        self.repository().delete(id)?;
        info!(
            "event=entity_delete module=service status=ok table={} id={id}",
            <Self::Entity as Record>::TABLE
        );
        Ok(())
    }
}
