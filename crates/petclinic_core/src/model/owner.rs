//! Owner domain model.
//!
//! # Responsibility
//! - Define the aggregate root of the owner -> pets -> visits graph.
//! - Validate contact fields before they reach storage.
//!
//! # Invariants
//! - `id` is assigned exactly once, on first save.
//! - Every pet in `pets` carries this owner's id once the owner is persisted.

use super::pet::Pet;
use super::Identified;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type OwnerId = i64;

const MAX_TELEPHONE_DIGITS: usize = 10;

/// Field-level validation failure for owner writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerValidationError {
    /// A required text field is empty or whitespace only.
    BlankField(&'static str),
    /// Telephone is not 1..=10 ASCII digits.
    InvalidTelephone(String),
}

impl Display for OwnerValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "owner field `{field}` must not be blank"),
            Self::InvalidTelephone(value) => write!(
                f,
                "owner telephone `{value}` must be 1 to {MAX_TELEPHONE_DIGITS} digits"
            ),
        }
    }
}

impl Error for OwnerValidationError {}

/// Pet owner with contact details and owned pets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: Option<OwnerId>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    #[serde(default)]
    pub pets: Vec<Pet>,
}

impl Owner {
    /// Creates an unsaved owner without pets.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        telephone: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: address.into(),
            city: city.into(),
            telephone: telephone.into(),
            pets: Vec::new(),
        }
    }

    /// Returns whether this owner has not been persisted yet.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Attaches a pet and points it back at this owner.
    pub fn add_pet(&mut self, mut pet: Pet) {
        pet.owner_id = self.id;
        self.pets.push(pet);
    }

    /// Looks up a pet by name, case-insensitively.
    ///
    /// With `ignore_new`, pets that have not been saved are skipped.
    pub fn pet(&self, name: &str, ignore_new: bool) -> Option<&Pet> {
        self.pets
            .iter()
            .filter(|pet| !ignore_new || !pet.is_new())
            .find(|pet| pet.name.eq_ignore_ascii_case(name))
    }

    /// Checks every scalar field required for persistence.
    pub fn validate(&self) -> Result<(), OwnerValidationError> {
        for (field, value) in [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("address", &self.address),
            ("city", &self.city),
        ] {
            if value.trim().is_empty() {
                return Err(OwnerValidationError::BlankField(field));
            }
        }

        let telephone = self.telephone.as_str();
        let digits_ok = !telephone.is_empty()
            && telephone.len() <= MAX_TELEPHONE_DIGITS
            && telephone.bytes().all(|b| b.is_ascii_digit());
        if !digits_ok {
            return Err(OwnerValidationError::InvalidTelephone(
                telephone.to_string(),
            ));
        }

        Ok(())
    }
}

impl Identified for Owner {
    const ENTITY: &'static str = "Owner";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::{Owner, OwnerValidationError};
    use crate::model::pet::Pet;
    use chrono::NaiveDate;

    fn sample_owner() -> Owner {
        Owner::new("George", "Franklin", "110 W. Liberty St.", "Madison", "6085551023")
    }

    fn birth_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2010, 9, 7).expect("valid date")
    }

    #[test]
    fn new_owner_is_new_and_valid() {
        let owner = sample_owner();
        assert!(owner.is_new());
        assert!(owner.pets.is_empty());
        assert_eq!(owner.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_blank_fields() {
        let mut owner = sample_owner();
        owner.city = "   ".to_string();
        assert_eq!(
            owner.validate(),
            Err(OwnerValidationError::BlankField("city"))
        );
    }

    #[test]
    fn validate_rejects_non_digit_or_long_telephone() {
        let mut owner = sample_owner();
        owner.telephone = "608-555-1023".to_string();
        assert!(matches!(
            owner.validate(),
            Err(OwnerValidationError::InvalidTelephone(_))
        ));

        owner.telephone = "60855510231".to_string();
        assert!(matches!(
            owner.validate(),
            Err(OwnerValidationError::InvalidTelephone(_))
        ));
    }

    #[test]
    fn add_pet_sets_owner_reference() {
        let mut owner = sample_owner();
        owner.id = Some(7);
        owner.add_pet(Pet::new("Leo", birth_date()));

        assert_eq!(owner.pets[0].owner_id, Some(7));
    }

    #[test]
    fn serializes_nested_pets_with_iso_dates() {
        let mut owner = sample_owner();
        owner.id = Some(1);
        owner.add_pet(Pet::new("Leo", birth_date()));

        let value = serde_json::to_value(&owner).unwrap();
        assert_eq!(value["last_name"], "Franklin");
        assert_eq!(value["pets"][0]["birth_date"], "2010-09-07");
        assert_eq!(value["pets"][0]["owner_id"], 1);
    }

    #[test]
    fn pet_lookup_is_case_insensitive_and_can_skip_unsaved() {
        let mut owner = sample_owner();
        let mut saved = Pet::new("Basil", birth_date());
        saved.id = Some(3);
        owner.add_pet(saved);
        owner.add_pet(Pet::new("Rosy", birth_date()));

        assert_eq!(owner.pet("basil", true).and_then(|p| p.id), Some(3));
        assert!(owner.pet("ROSY", false).is_some());
        assert!(owner.pet("rosy", true).is_none());
    }
}
