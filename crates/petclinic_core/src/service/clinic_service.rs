//! Clinic use-case service.
//!
//! # Responsibility
//! - Provide owner lookup and registration entry points for front ends.
//! - Delegate persistence to an `OwnerRepository` implementation.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::owner::{Owner, OwnerId};
use crate::model::pet_type::PetType;
use crate::repo::owner_repo::{OwnerRepository, RepoError, RepoResult};

/// Use-case service wrapper for owner operations.
pub struct ClinicService<R: OwnerRepository> {
    repo: R,
}

impl<R: OwnerRepository> ClinicService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Finds owners by last-name prefix.
    ///
    /// Surrounding whitespace is ignored; a blank query returns every owner.
    pub fn find_owners(&self, last_name: &str) -> RepoResult<Vec<Owner>> {
        self.repo.find_by_last_name(last_name.trim())
    }

    /// Loads one owner with pets and visits.
    pub fn owner(&self, id: OwnerId) -> RepoResult<Owner> {
        self.repo.find_by_id(id)
    }

    /// Persists a new owner and returns the generated id.
    ///
    /// # Contract
    /// - Rejects owners that already carry an id.
    pub fn register_owner(&self, owner: &mut Owner) -> RepoResult<OwnerId> {
        if let Some(id) = owner.id {
            return Err(RepoError::InvalidData(format!(
                "owner {id} is already registered"
            )));
        }
        self.repo.save(owner)?;
        owner
            .id
            .ok_or_else(|| RepoError::InvalidData("owner id was not assigned".to_string()))
    }

    /// Updates the scalar fields of an existing owner.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update_owner(&self, owner: &mut Owner) -> RepoResult<()> {
        if owner.is_new() {
            return Err(RepoError::InvalidData(
                "cannot update an owner that was never saved".to_string(),
            ));
        }
        self.repo.save(owner)
    }

    /// Lists pet types ordered by name.
    pub fn pet_types(&self) -> RepoResult<Vec<PetType>> {
        self.repo.get_pet_types()
    }
}
