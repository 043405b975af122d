//! Pet types command
//!
//! Usage: petclinic pet-types

use super::{print_json, Service};

/// Execute pet-types command
pub fn execute(service: &Service<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let pet_types = service.pet_types()?;
    print_json(&pet_types)
}
