// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Visit mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use petclinic_domain::Visit;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::encode_date;
use crate::diesel_schema::visits;
use crate::error::PersistenceError;

/// Inserts a new visit and returns its ID.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeyViolation` if the pet does not exist.
pub fn create_visit(conn: &mut SqliteConnection, visit: &Visit) -> Result<i64, PersistenceError> {
    diesel::insert_into(visits::table)
        .values((
            visits::visit_date.eq(encode_date(visit.visit_date)?),
            visits::description.eq(&visit.description),
            visits::pet_id.eq(visit.pet_id),
        ))
        .execute(conn)?;

    let visit_id: i64 = conn.get_last_insert_rowid()?;

    info!(visit_id, pet_id = visit.pet_id, "Visit created");
    Ok(visit_id)
}

/// Overwrites every field of an existing visit.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no visit has this ID, or
/// `PersistenceError::ForeignKeyViolation` if the pet does not exist.
pub fn update_visit(
    conn: &mut SqliteConnection,
    visit_id: i64,
    visit: &Visit,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(visits::table)
        .filter(visits::visit_id.eq(visit_id))
        .set((
            visits::visit_date.eq(encode_date(visit.visit_date)?),
            visits::description.eq(&visit.description),
            visits::pet_id.eq(visit.pet_id),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Visit with ID {visit_id} not found"
        )));
    }

    info!(visit_id, "Visit updated");
    Ok(())
}
