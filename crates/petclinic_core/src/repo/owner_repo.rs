//! Owner repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Map `owners` rows to `Owner` and back with explicit field binding.
//! - Hydrate each owner's pets and visits with one joined query.
//! - Serve the pet type reference list.
//!
//! # Invariants
//! - Write paths call `Owner::validate()` before SQL mutations.
//! - `find_by_id` reports a missing row as `NotFound`, never as `Db`.
//! - An owner's id is only ever assigned by `save` on insert.

use crate::db::DbError;
use crate::model::owner::{Owner, OwnerId, OwnerValidationError};
use crate::model::pet_type::PetType;
use crate::model::{find_by_id, Identified};
use crate::repo::pet_visit_extractor::{PetVisitAccumulator, PetVisitRow, PET_VISIT_SELECT_SQL};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const OWNER_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    address,
    city,
    telephone
FROM owners";

const REQUIRED_TABLES: [&str; 4] = ["owners", "pets", "visits", "types"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for owner persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Generic data-access fault from the SQL layer.
    Db(DbError),
    /// Exact-match lookup returned no row.
    NotFound { entity: &'static str, id: i64 },
    Validation(OwnerValidationError),
    /// Persisted or caller-supplied data cannot be mapped.
    InvalidData(String),
    MissingRequiredTable(&'static str),
}

impl RepoError {
    fn not_found<T: Identified>(id: i64) -> Self {
        Self::NotFound {
            entity: T::ENTITY,
            id,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid clinic data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "owner repository requires table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<OwnerValidationError> for RepoError {
    fn from(value: OwnerValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface for owners and their pets/visits.
pub trait OwnerRepository {
    /// Loads owners whose last name starts with `last_name`, with pets and visits.
    fn find_by_last_name(&self, last_name: &str) -> RepoResult<Vec<Owner>>;
    /// Loads one owner with pets and visits; `NotFound` when absent.
    fn find_by_id(&self, id: OwnerId) -> RepoResult<Owner>;
    /// Replaces `owner.pets` with the stored pets and their visits.
    fn load_pets_and_visits(&self, owner: &mut Owner) -> RepoResult<()>;
    /// Inserts a new owner (assigning its id) or updates an existing one.
    fn save(&self, owner: &mut Owner) -> RepoResult<()>;
    /// Returns all pet types ordered by name.
    fn get_pet_types(&self) -> RepoResult<Vec<PetType>>;
}

/// SQLite-backed owner repository.
pub struct SqliteOwnerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOwnerRepository<'conn> {
    /// Constructs a repository over a connection that carries the clinic schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        for table in REQUIRED_TABLES {
            if !table_exists(conn, table)? {
                return Err(RepoError::MissingRequiredTable(table));
            }
        }
        Ok(Self { conn })
    }

    fn load_owners_pets_and_visits(&self, owners: &mut [Owner]) -> RepoResult<()> {
        for owner in owners.iter_mut() {
            self.load_pets_and_visits(owner)?;
        }
        Ok(())
    }
}

impl OwnerRepository for SqliteOwnerRepository<'_> {
    fn find_by_last_name(&self, last_name: &str) -> RepoResult<Vec<Owner>> {
        let started_at = Instant::now();
        let mut stmt = self.conn.prepare(&format!(
            "{OWNER_SELECT_SQL}
             WHERE substr(last_name, 1, length(?1)) = ?1
             ORDER BY last_name ASC, first_name ASC, id ASC;"
        ))?;

        let mut owners = stmt
            .query_map([last_name], owner_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        self.load_owners_pets_and_visits(&mut owners)?;

        debug!(
            "event=owner_find module=repo status=ok mode=last_name_prefix count={} duration_ms={}",
            owners.len(),
            started_at.elapsed().as_millis()
        );
        Ok(owners)
    }

    fn find_by_id(&self, id: OwnerId) -> RepoResult<Owner> {
        let mut owner = self
            .conn
            .query_row(
                &format!("{OWNER_SELECT_SQL} WHERE id = ?1;"),
                [id],
                owner_from_row,
            )
            .optional()?
            .ok_or_else(|| RepoError::not_found::<Owner>(id))?;

        self.load_pets_and_visits(&mut owner)?;

        debug!(
            "event=owner_find module=repo status=ok mode=id owner_id={id} pet_count={}",
            owner.pets.len()
        );
        Ok(owner)
    }

    fn load_pets_and_visits(&self, owner: &mut Owner) -> RepoResult<()> {
        let owner_id = owner.id.ok_or_else(|| {
            RepoError::InvalidData("cannot load pets for an unsaved owner".to_string())
        })?;

        let mut stmt = self.conn.prepare(&format!(
            "{PET_VISIT_SELECT_SQL}
             WHERE pets.owner_id = ?1
             ORDER BY pets.name ASC, pets.id ASC, visits.visit_date ASC, visits.id ASC;"
        ))?;
        let mut rows = stmt.query([owner_id])?;
        let mut accumulator = PetVisitAccumulator::new();
        while let Some(row) = rows.next()? {
            accumulator.push(PetVisitRow::from_row(row)?)?;
        }

        let pet_types = self.get_pet_types()?;
        let pets = accumulator
            .finish()
            .into_iter()
            .map(|loaded| {
                let pet_type = find_by_id(&pet_types, loaded.type_id)
                    .cloned()
                    .ok_or_else(|| RepoError::not_found::<PetType>(loaded.type_id))?;
                let mut pet = loaded.pet;
                pet.pet_type = Some(pet_type);
                Ok(pet)
            })
            .collect::<RepoResult<Vec<_>>>()?;

        // Owner is only touched once every pet type resolved.
        owner.pets.clear();
        for pet in pets {
            owner.add_pet(pet);
        }

        Ok(())
    }

    fn save(&self, owner: &mut Owner) -> RepoResult<()> {
        owner.validate()?;

        let Some(id) = owner.id else {
            self.conn.execute(
                "INSERT INTO owners (
                    first_name,
                    last_name,
                    address,
                    city,
                    telephone
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    owner.first_name.as_str(),
                    owner.last_name.as_str(),
                    owner.address.as_str(),
                    owner.city.as_str(),
                    owner.telephone.as_str(),
                ],
            )?;
            let new_id = self.conn.last_insert_rowid();
            owner.id = Some(new_id);
            debug!("event=owner_save module=repo status=ok mode=insert owner_id={new_id}");
            return Ok(());
        };

        let changed = self.conn.execute(
            "UPDATE owners
             SET
                first_name = ?1,
                last_name = ?2,
                address = ?3,
                city = ?4,
                telephone = ?5
             WHERE id = ?6;",
            params![
                owner.first_name.as_str(),
                owner.last_name.as_str(),
                owner.address.as_str(),
                owner.city.as_str(),
                owner.telephone.as_str(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found::<Owner>(id));
        }

        debug!("event=owner_save module=repo status=ok mode=update owner_id={id}");
        Ok(())
    }

    fn get_pet_types(&self) -> RepoResult<Vec<PetType>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM types ORDER BY name ASC, id ASC;")?;
        let types = stmt
            .query_map([], |row| {
                Ok(PetType {
                    id: row.get("id")?,
                    name: row.get("name")?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(types)
    }
}

fn owner_from_row(row: &Row<'_>) -> rusqlite::Result<Owner> {
    Ok(Owner {
        id: Some(row.get("id")?),
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        address: row.get("address")?,
        city: row.get("city")?,
        telephone: row.get("telephone")?,
        pets: Vec::new(),
    })
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
