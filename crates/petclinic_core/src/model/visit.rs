//! Visit domain model.

use super::pet::PetId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type VisitId = i64;

/// One consultation recorded against a pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub id: Option<VisitId>,
    pub date: NaiveDate,
    pub description: String,
    /// Owning pet; set by `Pet::add_visit`.
    pub pet_id: Option<PetId>,
}

impl Visit {
    /// Creates an unsaved visit.
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            id: None,
            date,
            description: description.into(),
            pet_id: None,
        }
    }
}
