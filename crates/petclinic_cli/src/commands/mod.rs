//! Subcommand implementations.

use petclinic_core::{ClinicService, SqliteOwnerRepository};
use serde::Serialize;

pub mod owners;
pub mod pet_types;

pub type Service<'conn> = ClinicService<SqliteOwnerRepository<'conn>>;

/// Writes `value` to stdout as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
