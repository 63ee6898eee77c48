//! Data-access and business-rule layer for income/expense operations.
//!
//! Callers work with transfer shapes through `OperationTypeService` and
//! `OperationService`; both sit on repositories sharing one `Session`.

pub mod config;
pub mod db;
pub mod dto;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use dto::operation::{OperationCreateUpdate, OperationDto};
pub use dto::operation_type::{OperationTypeCreateUpdate, OperationTypeDto};
pub use validator::ValidationErrors;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::entity::{Entity, EntityId};
pub use model::operation::Operation;
pub use model::operation_type::OperationType;
pub use repo::operation_repo::{OperationRepository, SqliteOperationRepository};
pub use repo::operation_type_repo::{OperationTypeRepository, SqliteOperationTypeRepository};
pub use repo::{Filter, Record, RepoError, RepoResult, Repository, Session};
pub use service::operation_service::OperationService;
pub use service::operation_type_service::OperationTypeService;
pub use service::{EntityService, ServiceError, ServiceResult, TypeRef};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
