//! Pet domain model.
//!
//! # Invariants
//! - `visits` keeps load order; a pet without visits has an empty vec.
//! - `pet_type` is `None` only for pets that were never hydrated.

use super::owner::OwnerId;
use super::pet_type::PetType;
use super::visit::Visit;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type PetId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: Option<PetId>,
    pub name: String,
    pub birth_date: NaiveDate,
    /// Resolved from `pets.type_id` against the loaded type list.
    pub pet_type: Option<PetType>,
    /// Owning owner; set by `Owner::add_pet`.
    pub owner_id: Option<OwnerId>,
    pub visits: Vec<Visit>,
}

impl Pet {
    /// Creates an unsaved pet without type or visits.
    pub fn new(name: impl Into<String>, birth_date: NaiveDate) -> Self {
        Self {
            id: None,
            name: name.into(),
            birth_date,
            pet_type: None,
            owner_id: None,
            visits: Vec::new(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Appends a visit and points it back at this pet.
    pub fn add_visit(&mut self, mut visit: Visit) {
        visit.pet_id = self.id;
        self.visits.push(visit);
    }
}
