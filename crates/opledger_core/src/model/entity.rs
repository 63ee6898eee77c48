//! Identity contract for persisted records.

use uuid::Uuid;

/// Stable identifier of every persisted record.
pub type EntityId = Uuid;

/// A persisted record with a globally unique identity field.
pub trait Entity {
    /// Returns the record identity.
    fn id(&self) -> EntityId;
}
