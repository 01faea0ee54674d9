// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Owner mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use petclinic_domain::Owner;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::owners;
use crate::error::PersistenceError;

/// Inserts a new owner and returns its ID.
///
/// Any `owner_id` already on `owner` is ignored.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_owner(conn: &mut SqliteConnection, owner: &Owner) -> Result<i64, PersistenceError> {
    debug!("Creating owner: {} {}", owner.first_name, owner.last_name);

    diesel::insert_into(owners::table)
        .values((
            owners::first_name.eq(&owner.first_name),
            owners::last_name.eq(&owner.last_name),
            owners::address.eq(&owner.address),
            owners::city.eq(&owner.city),
            owners::telephone.eq(owner.telephone.value()),
        ))
        .execute(conn)?;

    let owner_id: i64 = conn.get_last_insert_rowid()?;

    info!(owner_id, "Owner created");
    Ok(owner_id)
}

/// Overwrites every field of an existing owner.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no owner has this ID.
pub fn update_owner(
    conn: &mut SqliteConnection,
    owner_id: i64,
    owner: &Owner,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(owners::table)
        .filter(owners::owner_id.eq(owner_id))
        .set((
            owners::first_name.eq(&owner.first_name),
            owners::last_name.eq(&owner.last_name),
            owners::address.eq(&owner.address),
            owners::city.eq(&owner.city),
            owners::telephone.eq(owner.telephone.value()),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Owner with ID {owner_id} not found"
        )));
    }

    info!(owner_id, "Owner updated");
    Ok(())
}

/// Deletes an owner. Their pets, and those pets' visits, go with them.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no owner has this ID.
pub fn delete_owner(conn: &mut SqliteConnection, owner_id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(owners::table)
        .filter(owners::owner_id.eq(owner_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Owner with ID {owner_id} not found"
        )));
    }

    info!(owner_id, "Owner deleted");
    Ok(())
}
