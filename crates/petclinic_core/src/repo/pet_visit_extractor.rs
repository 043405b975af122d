//! Folding of the joined `pets LEFT OUTER JOIN visits` row stream.
//!
//! # Responsibility
//! - Map one joined row into a typed `PetVisitRow`.
//! - Group visit rows under their parent pet, keyed by pet id.
//!
//! # Invariants
//! - Pets keep the order in which they first appear in the stream.
//! - Visits keep row order within their pet.
//! - A row with NULL visit columns contributes the pet and zero visits.

use crate::model::pet::{Pet, PetId};
use crate::model::pet_type::PetTypeId;
use crate::model::visit::Visit;
use crate::repo::owner_repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::Row;
use std::collections::HashMap;

/// Column list shared by the joined query and `PetVisitRow::from_row`.
pub(crate) const PET_VISIT_SELECT_SQL: &str = "SELECT
    pets.id AS pet_id,
    pets.name AS name,
    pets.birth_date AS birth_date,
    pets.type_id AS type_id,
    pets.owner_id AS owner_id,
    visits.id AS visit_id,
    visits.visit_date AS visit_date,
    visits.description AS description
FROM pets
LEFT OUTER JOIN visits ON pets.id = visits.pet_id";

/// One row of the joined pet/visit query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetVisitRow {
    pub pet_id: PetId,
    pub name: String,
    pub birth_date: NaiveDate,
    pub type_id: PetTypeId,
    pub owner_id: i64,
    pub visit_id: Option<i64>,
    pub visit_date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl PetVisitRow {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            pet_id: row.get("pet_id")?,
            name: row.get("name")?,
            birth_date: row.get("birth_date")?,
            type_id: row.get("type_id")?,
            owner_id: row.get("owner_id")?,
            visit_id: row.get("visit_id")?,
            visit_date: row.get("visit_date")?,
            description: row.get("description")?,
        })
    }
}

/// Pet hydrated from the join, still waiting for its type to be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPet {
    pub pet: Pet,
    pub type_id: PetTypeId,
}

/// Streaming accumulator keyed by pet id.
#[derive(Debug, Default)]
pub struct PetVisitAccumulator {
    pets: Vec<LoadedPet>,
    positions: HashMap<PetId, usize>,
}

impl PetVisitAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one joined row.
    ///
    /// # Errors
    /// - `InvalidData` when a row has a visit id but no visit date.
    pub fn push(&mut self, row: PetVisitRow) -> RepoResult<()> {
        let position = match self.positions.get(&row.pet_id) {
            Some(position) => *position,
            None => {
                let mut pet = Pet::new(row.name, row.birth_date);
                pet.id = Some(row.pet_id);
                pet.owner_id = Some(row.owner_id);
                self.pets.push(LoadedPet {
                    pet,
                    type_id: row.type_id,
                });
                self.positions.insert(row.pet_id, self.pets.len() - 1);
                self.pets.len() - 1
            }
        };

        let Some(visit_id) = row.visit_id else {
            return Ok(());
        };
        let date = row.visit_date.ok_or_else(|| {
            RepoError::InvalidData(format!("visit {visit_id} has no visits.visit_date"))
        })?;

        let mut visit = Visit::new(date, row.description.unwrap_or_default());
        visit.id = Some(visit_id);
        self.pets[position].pet.add_visit(visit);
        Ok(())
    }

    /// Returns the grouped pets in first-seen order.
    pub fn finish(self) -> Vec<LoadedPet> {
        self.pets
    }
}

#[cfg(test)]
mod tests {
    use super::{PetVisitAccumulator, PetVisitRow};
    use crate::repo::owner_repo::RepoError;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2013, 1, day).expect("valid date")
    }

    fn row(pet_id: i64, visit: Option<(i64, &str)>) -> PetVisitRow {
        PetVisitRow {
            pet_id,
            name: format!("pet-{pet_id}"),
            birth_date: date(1),
            type_id: 2,
            owner_id: 6,
            visit_id: visit.map(|(id, _)| id),
            visit_date: visit.map(|(id, _)| date(id as u32)),
            description: visit.map(|(_, text)| text.to_string()),
        }
    }

    #[test]
    fn groups_visits_under_their_pet_in_row_order() {
        let mut acc = PetVisitAccumulator::new();
        acc.push(row(7, Some((1, "rabies shot")))).unwrap();
        acc.push(row(7, Some((4, "spayed")))).unwrap();
        acc.push(row(8, Some((2, "neutered")))).unwrap();

        let pets = acc.finish();
        assert_eq!(pets.len(), 2);
        assert_eq!(pets[0].pet.id, Some(7));
        let descriptions: Vec<&str> = pets[0]
            .pet
            .visits
            .iter()
            .map(|v| v.description.as_str())
            .collect();
        assert_eq!(descriptions, ["rabies shot", "spayed"]);
        assert_eq!(pets[0].pet.visits[0].pet_id, Some(7));
        assert_eq!(pets[1].pet.visits.len(), 1);
    }

    #[test]
    fn null_visit_columns_yield_pet_with_no_visits() {
        let mut acc = PetVisitAccumulator::new();
        acc.push(row(3, None)).unwrap();

        let pets = acc.finish();
        assert_eq!(pets.len(), 1);
        assert!(pets[0].pet.visits.is_empty());
        assert_eq!(pets[0].pet.owner_id, Some(6));
        assert_eq!(pets[0].type_id, 2);
    }

    #[test]
    fn non_contiguous_rows_still_group_by_pet_id() {
        let mut acc = PetVisitAccumulator::new();
        acc.push(row(1, Some((1, "a")))).unwrap();
        acc.push(row(2, None)).unwrap();
        acc.push(row(1, Some((3, "b")))).unwrap();

        let pets = acc.finish();
        assert_eq!(pets.len(), 2);
        assert_eq!(pets[0].pet.visits.len(), 2);
        assert!(pets[1].pet.visits.is_empty());
    }

    #[test]
    fn visit_without_date_is_invalid_data() {
        let mut acc = PetVisitAccumulator::new();
        let mut broken = row(1, Some((5, "checkup")));
        broken.visit_date = None;

        let err = acc.push(broken).unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(_)));
    }
}
