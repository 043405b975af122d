//! Pet type reference data.

use super::Identified;
use serde::{Deserialize, Serialize};

pub type PetTypeId = i64;

/// Species label attached to every pet, e.g. `cat` or `dog`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetType {
    pub id: PetTypeId,
    pub name: String,
}

impl PetType {
    pub fn new(id: PetTypeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Identified for PetType {
    const ENTITY: &'static str = "PetType";

    fn id(&self) -> Option<i64> {
        Some(self.id)
    }
}
