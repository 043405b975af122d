//! Clinic domain model.
//!
//! # Responsibility
//! - Define the owner/pet/visit graph and the pet type reference data.
//! - Provide keyed lookup over identified entities.
//!
//! # Invariants
//! - Entity ids are `None` until the database assigns them.
//! - A persisted id never changes afterwards.

pub mod owner;
pub mod pet;
pub mod pet_type;
pub mod visit;

/// Entity with an optional database-assigned identity.
pub trait Identified {
    /// Human-readable entity name used in not-found diagnostics.
    const ENTITY: &'static str;

    fn id(&self) -> Option<i64>;
}

/// Finds the entity with the given id in a loaded collection.
pub fn find_by_id<T: Identified>(entities: &[T], id: i64) -> Option<&T> {
    entities.iter().find(|entity| entity.id() == Some(id))
}
