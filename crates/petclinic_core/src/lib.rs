//! Core data access for the pet clinic.
//! Maps owners, pets, visits and pet types onto SQLite.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ClinicConfig, ConfigError};
pub use logging::{init_logging, logging_status, LogLevel, LoggingError};
pub use model::owner::{Owner, OwnerId, OwnerValidationError};
pub use model::pet::{Pet, PetId};
pub use model::pet_type::{PetType, PetTypeId};
pub use model::visit::{Visit, VisitId};
pub use repo::owner_repo::{OwnerRepository, RepoError, RepoResult, SqliteOwnerRepository};
pub use service::clinic_service::ClinicService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
