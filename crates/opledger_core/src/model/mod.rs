//! Ledger domain model.
//!
//! # Responsibility
//! - Define the persisted records: operation types and operations.
//! - Provide the identity contract shared by every persisted record.
//!
//! # Invariants
//! - Every persisted record is identified by a stable `EntityId`.
//! - Operations reference exactly one operation type by id.

pub mod entity;
pub mod operation;
pub mod operation_type;
