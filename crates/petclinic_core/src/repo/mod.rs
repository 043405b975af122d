//! Repository layer for clinic persistence.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) distinct from DB
//!   transport errors.

pub mod owner_repo;
pub mod pet_visit_extractor;
