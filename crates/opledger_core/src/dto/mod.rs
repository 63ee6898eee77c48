//! Transfer shapes used at the service boundary.
//!
//! # Responsibility
//! - Decouple the external representation from persisted entities.
//! - Declare field constraints checked before persistence.
//! - Map entities to output shapes and input shapes to entities.
//!
//! # Invariants
//! - Transfer shapes are never persisted directly.
//! - Operation shapes expose the related type by name, never as a nested entity.

pub mod operation;
pub mod operation_type;
