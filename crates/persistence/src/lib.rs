// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Pet Clinic.
//!
//! Stores owners, pets, pet types, vets, specialties and visits in `SQLite`
//! via Diesel. The schema is embedded and migrated on open.
//!
//! ## Referential Rules
//!
//! Foreign key enforcement is switched on for every connection and verified
//! at startup. The schema then guarantees:
//!
//! - deleting an owner deletes their pets, and those pets' visits
//! - deleting a pet deletes its visits
//! - a pet type cannot be deleted while any pet uses it
//! - deleting a vet or specialty removes only the association rows
//!
//! ## Testing
//!
//! [`Persistence::new_in_memory`] gives every caller its own isolated
//! shared-cache in-memory database.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use petclinic_domain::{NameQuery, Owner, Pet, PetType, Specialty, Vet, Visit};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    OwnerDetails, OwnerListing, PageWindow, PetDetails, PetRecord, PetWithType, SeedSummary,
    VetDetails, VisitDetails,
};
pub use error::PersistenceError;
pub use mutations::reference::{DEFAULT_PET_TYPES, DEFAULT_SPECIALTIES};

use backend::PersistenceBackend;

/// Persistence adapter for the clinic records.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_clinic_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Owners
    // ========================================================================

    /// Inserts a new owner and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_owner(&mut self, owner: &Owner) -> Result<i64, PersistenceError> {
        mutations::owners::create_owner(&mut self.conn, owner)
    }

    /// Overwrites every field of an existing owner.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no owner has this ID.
    pub fn update_owner(&mut self, owner_id: i64, owner: &Owner) -> Result<(), PersistenceError> {
        mutations::owners::update_owner(&mut self.conn, owner_id, owner)
    }

    /// Deletes an owner along with their pets and the pets' visits.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no owner has this ID.
    pub fn delete_owner(&mut self, owner_id: i64) -> Result<(), PersistenceError> {
        mutations::owners::delete_owner(&mut self.conn, owner_id)
    }

    /// Retrieves an owner by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_owner(&mut self, owner_id: i64) -> Result<Option<Owner>, PersistenceError> {
        queries::owners::get_owner(&mut self.conn, owner_id)
    }

    /// Retrieves an owner with their pets and visits.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_owner_details(
        &mut self,
        owner_id: i64,
    ) -> Result<Option<OwnerDetails>, PersistenceError> {
        queries::owners::get_owner_details(&mut self.conn, owner_id)
    }

    /// Counts owners matching an optional name filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_owners(&mut self, query: Option<&NameQuery>) -> Result<i64, PersistenceError> {
        queries::owners::count_owners(&mut self.conn, query)
    }

    /// Lists owners matching an optional name filter.
    ///
    /// Without a window every matching owner is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_owners(
        &mut self,
        query: Option<&NameQuery>,
        window: Option<PageWindow>,
    ) -> Result<Vec<OwnerListing>, PersistenceError> {
        queries::owners::list_owners(&mut self.conn, query, window)
    }

    /// Lists every owner for use as form choices.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_owner_choices(&mut self) -> Result<Vec<Owner>, PersistenceError> {
        queries::owners::list_owner_choices(&mut self.conn)
    }

    // ========================================================================
    // Pets
    // ========================================================================

    /// Inserts a new pet and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails or a reference does not exist.
    pub fn create_pet(&mut self, pet: &Pet) -> Result<i64, PersistenceError> {
        mutations::pets::create_pet(&mut self.conn, pet)
    }

    /// Overwrites every field of an existing pet.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no pet has this ID.
    pub fn update_pet(&mut self, pet_id: i64, pet: &Pet) -> Result<(), PersistenceError> {
        mutations::pets::update_pet(&mut self.conn, pet_id, pet)
    }

    /// Deletes a pet and its visits.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no pet has this ID.
    pub fn delete_pet(&mut self, pet_id: i64) -> Result<(), PersistenceError> {
        mutations::pets::delete_pet(&mut self.conn, pet_id)
    }

    /// Retrieves a pet by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_pet(&mut self, pet_id: i64) -> Result<Option<Pet>, PersistenceError> {
        queries::pets::get_pet(&mut self.conn, pet_id)
    }

    /// Retrieves a pet with its type, owner and visits.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_pet_details(&mut self, pet_id: i64) -> Result<Option<PetDetails>, PersistenceError> {
        queries::pets::get_pet_details(&mut self.conn, pet_id)
    }

    /// Lists every pet with its type for use as form choices.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_pet_choices(&mut self) -> Result<Vec<PetWithType>, PersistenceError> {
        queries::pets::list_pet_choices(&mut self.conn)
    }

    // ========================================================================
    // Vets
    // ========================================================================

    /// Inserts a new vet with its specialties and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails or a specialty does not exist.
    pub fn create_vet(&mut self, vet: &Vet) -> Result<i64, PersistenceError> {
        mutations::vets::create_vet(&mut self.conn, vet)
    }

    /// Overwrites a vet and replaces its specialty set.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no vet has this ID.
    pub fn update_vet(&mut self, vet_id: i64, vet: &Vet) -> Result<(), PersistenceError> {
        mutations::vets::update_vet(&mut self.conn, vet_id, vet)
    }

    /// Counts all vets.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_vets(&mut self) -> Result<i64, PersistenceError> {
        queries::vets::count_vets(&mut self.conn)
    }

    /// Lists vets with their specialties.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_vets(
        &mut self,
        window: Option<PageWindow>,
    ) -> Result<Vec<VetDetails>, PersistenceError> {
        queries::vets::list_vets(&mut self.conn, window)
    }

    /// Retrieves a vet with its specialties.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_vet_details(&mut self, vet_id: i64) -> Result<Option<VetDetails>, PersistenceError> {
        queries::vets::get_vet_details(&mut self.conn, vet_id)
    }

    // ========================================================================
    // Visits
    // ========================================================================

    /// Inserts a new visit and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails or the pet does not exist.
    pub fn create_visit(&mut self, visit: &Visit) -> Result<i64, PersistenceError> {
        mutations::visits::create_visit(&mut self.conn, visit)
    }

    /// Overwrites every field of an existing visit.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no visit has this ID.
    pub fn update_visit(&mut self, visit_id: i64, visit: &Visit) -> Result<(), PersistenceError> {
        mutations::visits::update_visit(&mut self.conn, visit_id, visit)
    }

    /// Retrieves a visit by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_visit(&mut self, visit_id: i64) -> Result<Option<Visit>, PersistenceError> {
        queries::visits::get_visit(&mut self.conn, visit_id)
    }

    /// Retrieves a visit with its pet and owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_visit_details(
        &mut self,
        visit_id: i64,
    ) -> Result<Option<VisitDetails>, PersistenceError> {
        queries::visits::get_visit_details(&mut self.conn, visit_id)
    }

    /// Lists a pet's visits, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_visits_for_pet(&mut self, pet_id: i64) -> Result<Vec<Visit>, PersistenceError> {
        queries::visits::list_visits_for_pet(&mut self.conn, pet_id)
    }

    // ========================================================================
    // Reference data
    // ========================================================================

    /// Inserts a pet type and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_pet_type(&mut self, name: &str) -> Result<i64, PersistenceError> {
        mutations::reference::create_pet_type(&mut self.conn, name)
    }

    /// Deletes a pet type that no pet uses.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::RecordReferenced` if any pet has this type.
    pub fn delete_pet_type(&mut self, pet_type_id: i64) -> Result<(), PersistenceError> {
        mutations::reference::delete_pet_type(&mut self.conn, pet_type_id)
    }

    /// Lists all pet types ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_pet_types(&mut self) -> Result<Vec<PetType>, PersistenceError> {
        queries::reference::list_pet_types(&mut self.conn)
    }

    /// Inserts a specialty and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_specialty(&mut self, name: &str) -> Result<i64, PersistenceError> {
        mutations::reference::create_specialty(&mut self.conn, name)
    }

    /// Deletes a specialty, detaching it from every vet.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no specialty has this ID.
    pub fn delete_specialty(&mut self, specialty_id: i64) -> Result<(), PersistenceError> {
        mutations::reference::delete_specialty(&mut self.conn, specialty_id)
    }

    /// Lists all specialties ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_specialties(&mut self) -> Result<Vec<Specialty>, PersistenceError> {
        queries::reference::list_specialties(&mut self.conn)
    }

    /// Seeds the default pet types and specialties into empty tables.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails.
    pub fn seed_reference_data(&mut self) -> Result<SeedSummary, PersistenceError> {
        mutations::reference::seed_reference_data(&mut self.conn)
    }
}
