// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for page reads and form submissions.
//!
//! Handlers are synchronous and take the persistence adapter by mutable
//! reference. Anything that depends on the current date takes `today`.

use petclinic_domain::{NameQuery, Owner, Pet, Specialty, Visit};
use petclinic_persistence::{
    OwnerListing, Persistence, PetDetails, PetRecord, PetWithType, VetDetails,
};
use time::Date;
use tracing::{debug, info, warn};

use crate::error::{ApiError, translate_persistence_error};
use crate::form_data::FormData;
use crate::forms::owner::{owner_values, render_owner_form, validate_owner};
use crate::forms::pet::{PetChoices, pet_values, render_pet_form, validate_pet};
use crate::forms::vet::{render_vet_form, validate_vet, vet_values};
use crate::forms::visit::{new_visit_values, render_visit_form, validate_visit, visit_values};
use crate::forms::FormView;
use crate::notice::Notice;
use crate::pagination::{PAGE_SIZE, PageInfo, PageRequest};
use crate::paths;
use crate::request_response::{
    HomePage, Link, OwnerDetailPage, OwnerInfo, OwnerListPage, OwnerSearchPage, OwnerSummary,
    PetDetailPage, PetInfo, PetRef, VetDetailPage, VetListPage, VetSummary, VisitDetailPage,
    VisitInfo,
};

/// The result of submitting a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// The record was saved; the client should be sent to `redirect_to`.
    Saved {
        redirect_to: String,
        notice: Option<Notice>,
    },
    /// The submission was rejected; re-render this form.
    Invalid(FormView),
}

/// Which pet form is being shown or submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetFormTarget {
    /// A new pet, optionally pre-bound to an owner.
    New { owner_id: Option<i64> },
    /// An existing pet.
    Edit { pet_id: i64 },
}

/// Which visit form is being shown or submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitFormTarget {
    /// A new visit, optionally pre-bound to a pet.
    New { pet_id: Option<i64> },
    /// An existing visit.
    Edit { visit_id: i64 },
}

fn notice_text(notice: Option<Notice>) -> Option<String> {
    notice.map(|n| n.message().to_string())
}

/// Returns the ID of a record loaded from storage.
fn stored_id(id: Option<i64>, kind: &str) -> Result<i64, ApiError> {
    id.ok_or_else(|| ApiError::Internal {
        message: format!("Stored {kind} has no ID"),
    })
}

fn owner_info(owner: &Owner) -> Result<OwnerInfo, ApiError> {
    let owner_id: i64 = stored_id(owner.owner_id, "owner")?;
    Ok(OwnerInfo {
        owner_id,
        full_name: owner.full_name(),
        first_name: owner.first_name.clone(),
        last_name: owner.last_name.clone(),
        address: owner.address.clone(),
        city: owner.city.clone(),
        telephone: owner.telephone.value().to_string(),
        url: paths::owner_detail(owner_id),
    })
}

fn owner_summary(listing: OwnerListing) -> Result<OwnerSummary, ApiError> {
    Ok(OwnerSummary {
        owner: owner_info(&listing.owner)?,
        pets: listing.pet_names,
    })
}

fn visit_info(visit: &Visit, pet_display: &str) -> Result<VisitInfo, ApiError> {
    let visit_id: i64 = stored_id(visit.visit_id, "visit")?;
    let date: String = visit.visit_date.to_string();
    Ok(VisitInfo {
        visit_id,
        display: format!("{pet_display} - {date}"),
        date,
        description: visit.description.clone(),
        url: paths::visit_detail(visit_id),
        edit_url: paths::visit_edit(visit_id),
    })
}

fn pet_info(record: PetRecord, today: Date) -> Result<PetInfo, ApiError> {
    let pet_id: i64 = stored_id(record.pet.pet_id, "pet")?;
    let display: String = PetWithType {
        pet: record.pet.clone(),
        pet_type: record.pet_type.clone(),
    }
    .label();
    let visits: Vec<VisitInfo> = record
        .visits
        .iter()
        .map(|visit| visit_info(visit, &display))
        .collect::<Result<_, _>>()?;

    Ok(PetInfo {
        pet_id,
        name: record.pet.name.clone(),
        birth_date: record.pet.birth_date.to_string(),
        age: record.pet.age_on(today),
        pet_type: record.pet_type.name,
        display,
        url: paths::pet_detail(pet_id),
        edit_url: paths::pet_edit(pet_id),
        add_visit_url: paths::visit_new_for_pet(pet_id),
        visits,
    })
}

fn vet_summary(details: VetDetails) -> Result<VetSummary, ApiError> {
    let vet_id: i64 = stored_id(details.vet.vet_id, "vet")?;
    Ok(VetSummary {
        vet_id,
        full_name: details.vet.full_name(),
        first_name: details.vet.first_name,
        last_name: details.vet.last_name,
        specialties: details.specialties.into_iter().map(|s| s.name).collect(),
        url: paths::vet_detail(vet_id),
        edit_url: paths::vet_edit(vet_id),
    })
}

// ============================================================================
// Home
// ============================================================================

/// Builds the welcome page.
#[must_use]
pub fn home_page(notice: Option<Notice>) -> HomePage {
    HomePage {
        title: String::from("Welcome"),
        links: vec![
            Link::new("Find owners", paths::owner_search()),
            Link::new("All owners", paths::owner_list()),
            Link::new("Veterinarians", paths::vet_list()),
        ],
        notice: notice_text(notice),
    }
}

// ============================================================================
// Owners
// ============================================================================

/// Lists one page of owners, optionally filtered by name.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the page does not exist, or
/// `ApiError::Internal` if the store fails.
pub fn list_owners(
    persistence: &mut Persistence,
    query: Option<&str>,
    page: Option<&str>,
    notice: Option<Notice>,
) -> Result<OwnerListPage, ApiError> {
    let name_query: Option<NameQuery> = NameQuery::parse(query);
    let request: PageRequest = PageRequest::parse(page)?;

    let count: i64 = persistence
        .count_owners(name_query.as_ref())
        .map_err(translate_persistence_error)?;
    let pagination: PageInfo = PageInfo::resolve(request, count, PAGE_SIZE)?;

    let owners: Vec<OwnerSummary> = persistence
        .list_owners(name_query.as_ref(), Some(pagination.window()))
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(owner_summary)
        .collect::<Result<_, _>>()?;

    debug!(
        page = pagination.page,
        count = pagination.count,
        "Listed owners"
    );

    Ok(OwnerListPage {
        query: name_query.map(|q| q.text().to_string()),
        owners,
        pagination,
        new_owner_url: paths::owner_new(),
        notice: notice_text(notice),
    })
}

/// Lists every owner matching the query. A blank query matches everyone.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the store fails.
pub fn search_owners(
    persistence: &mut Persistence,
    query: Option<&str>,
) -> Result<OwnerSearchPage, ApiError> {
    let name_query: Option<NameQuery> = NameQuery::parse(query);

    let owners: Vec<OwnerSummary> = persistence
        .list_owners(name_query.as_ref(), None)
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(owner_summary)
        .collect::<Result<_, _>>()?;

    Ok(OwnerSearchPage {
        query: name_query.map(|q| q.text().to_string()),
        count: owners.len(),
        owners,
    })
}

/// Shows one owner with their pets and visits.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the owner does not exist.
pub fn get_owner_detail(
    persistence: &mut Persistence,
    owner_id: i64,
    today: Date,
    notice: Option<Notice>,
) -> Result<OwnerDetailPage, ApiError> {
    let details = persistence
        .get_owner_details(owner_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("Owner", owner_id))?;

    let pets: Vec<PetInfo> = details
        .pets
        .into_iter()
        .map(|record| pet_info(record, today))
        .collect::<Result<_, _>>()?;

    Ok(OwnerDetailPage {
        owner: owner_info(&details.owner)?,
        pets,
        edit_url: paths::owner_edit(owner_id),
        add_pet_url: paths::pet_new_for_owner(owner_id),
        notice: notice_text(notice),
    })
}

fn load_owner(persistence: &mut Persistence, owner_id: i64) -> Result<Owner, ApiError> {
    persistence
        .get_owner(owner_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("Owner", owner_id))
}

/// Builds the blank create form, or the edit form of an existing owner.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the owner to edit does not exist.
pub fn owner_form(
    persistence: &mut Persistence,
    owner_id: Option<i64>,
) -> Result<FormView, ApiError> {
    match owner_id {
        None => Ok(render_owner_form(
            "New Owner",
            &paths::owner_new(),
            &FormData::new(),
            &[],
        )),
        Some(owner_id) => {
            let owner: Owner = load_owner(persistence, owner_id)?;
            Ok(render_owner_form(
                "Edit Owner",
                &paths::owner_edit(owner_id),
                &owner_values(&owner),
                &[],
            ))
        }
    }
}

/// Creates an owner, or updates an existing one, from a submitted form.
///
/// A new owner leads to the owner list; an updated one to its detail page.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the owner to edit does not exist,
/// or `ApiError::Internal` if the store fails.
pub fn submit_owner_form(
    persistence: &mut Persistence,
    owner_id: Option<i64>,
    form: &FormData,
) -> Result<FormOutcome, ApiError> {
    if let Some(owner_id) = owner_id {
        load_owner(persistence, owner_id)?;
    }

    let owner: Owner = match validate_owner(form) {
        Ok(owner) => owner,
        Err(errors) => {
            warn!(count = errors.len(), "Owner form rejected");
            let (title, action) = match owner_id {
                None => ("New Owner", paths::owner_new()),
                Some(owner_id) => ("Edit Owner", paths::owner_edit(owner_id)),
            };
            return Ok(FormOutcome::Invalid(render_owner_form(
                title, &action, form, &errors,
            )));
        }
    };

    let redirect_to: String = match owner_id {
        None => {
            let owner_id: i64 = persistence
                .create_owner(&owner)
                .map_err(translate_persistence_error)?;
            info!(owner_id, "Owner added");
            paths::owner_list()
        }
        Some(owner_id) => {
            persistence
                .update_owner(owner_id, &owner)
                .map_err(translate_persistence_error)?;
            info!(owner_id, "Owner saved");
            paths::owner_detail(owner_id)
        }
    };

    Ok(FormOutcome::Saved {
        redirect_to,
        notice: None,
    })
}

// ============================================================================
// Pets
// ============================================================================

/// Shows one pet with its owner and visits.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the pet does not exist.
pub fn get_pet_detail(
    persistence: &mut Persistence,
    pet_id: i64,
    today: Date,
    notice: Option<Notice>,
) -> Result<PetDetailPage, ApiError> {
    let details: PetDetails = persistence
        .get_pet_details(pet_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("Pet", pet_id))?;

    let owner: OwnerInfo = owner_info(&details.owner)?;
    let record: PetRecord = PetRecord {
        pet: details.pet,
        pet_type: details.pet_type,
        visits: details.visits,
    };

    Ok(PetDetailPage {
        pet: pet_info(record, today)?,
        owner,
        notice: notice_text(notice),
    })
}

fn load_pet(persistence: &mut Persistence, pet_id: i64) -> Result<Pet, ApiError> {
    persistence
        .get_pet(pet_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("Pet", pet_id))
}

fn load_pet_choices(persistence: &mut Persistence) -> Result<PetChoices, ApiError> {
    Ok(PetChoices {
        pet_types: persistence
            .list_pet_types()
            .map_err(translate_persistence_error)?,
        owners: persistence
            .list_owner_choices()
            .map_err(translate_persistence_error)?,
    })
}

fn pet_form_heading(target: PetFormTarget) -> (&'static str, String) {
    match target {
        PetFormTarget::New { owner_id: None } => ("New Pet", paths::pet_new()),
        PetFormTarget::New {
            owner_id: Some(owner_id),
        } => ("New Pet", paths::pet_new_for_owner(owner_id)),
        PetFormTarget::Edit { pet_id } => ("Edit Pet", paths::pet_edit(pet_id)),
    }
}

/// Builds a pet form.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the pre-bound owner or the pet to
/// edit does not exist.
pub fn pet_form(
    persistence: &mut Persistence,
    target: PetFormTarget,
) -> Result<FormView, ApiError> {
    let (title, action) = pet_form_heading(target);
    let choices: PetChoices = load_pet_choices(persistence)?;

    match target {
        PetFormTarget::New { owner_id } => {
            let bound_owner: Option<Owner> = owner_id
                .map(|owner_id| load_owner(persistence, owner_id))
                .transpose()?;
            Ok(render_pet_form(
                title,
                &action,
                &FormData::new(),
                &[],
                &choices,
                bound_owner.as_ref(),
            ))
        }
        PetFormTarget::Edit { pet_id } => {
            let pet: Pet = load_pet(persistence, pet_id)?;
            Ok(render_pet_form(
                title,
                &action,
                &pet_values(&pet),
                &[],
                &choices,
                None,
            ))
        }
    }
}

/// Creates or updates a pet from a submitted form.
///
/// A pre-bound owner always wins over any `owner` value in the form. Either
/// way the client is sent to the owner's page.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the pre-bound owner or the pet to
/// edit does not exist, or `ApiError::Internal` if the store fails.
pub fn submit_pet_form(
    persistence: &mut Persistence,
    target: PetFormTarget,
    form: &FormData,
    today: Date,
) -> Result<FormOutcome, ApiError> {
    let (title, action) = pet_form_heading(target);

    let bound_owner: Option<Owner> = match target {
        PetFormTarget::New { owner_id } => owner_id
            .map(|owner_id| load_owner(persistence, owner_id))
            .transpose()?,
        PetFormTarget::Edit { pet_id } => {
            load_pet(persistence, pet_id)?;
            None
        }
    };
    let bound_owner_id: Option<i64> = bound_owner.as_ref().and_then(|o| o.owner_id);

    let choices: PetChoices = load_pet_choices(persistence)?;
    let pet: Pet = match validate_pet(form, &choices, bound_owner_id, today) {
        Ok(pet) => pet,
        Err(errors) => {
            warn!(count = errors.len(), "Pet form rejected");
            return Ok(FormOutcome::Invalid(render_pet_form(
                title,
                &action,
                form,
                &errors,
                &choices,
                bound_owner.as_ref(),
            )));
        }
    };

    match target {
        PetFormTarget::New { .. } => {
            let pet_id: i64 = persistence
                .create_pet(&pet)
                .map_err(translate_persistence_error)?;
            info!(pet_id, owner_id = pet.owner_id, "Pet added");
        }
        PetFormTarget::Edit { pet_id } => {
            persistence
                .update_pet(pet_id, &pet)
                .map_err(translate_persistence_error)?;
            info!(pet_id, owner_id = pet.owner_id, "Pet saved");
        }
    }

    Ok(FormOutcome::Saved {
        redirect_to: paths::owner_detail(pet.owner_id),
        notice: None,
    })
}

// ============================================================================
// Vets
// ============================================================================

/// Lists one page of vets.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the page does not exist, or
/// `ApiError::Internal` if the store fails.
pub fn list_vets(
    persistence: &mut Persistence,
    page: Option<&str>,
    notice: Option<Notice>,
) -> Result<VetListPage, ApiError> {
    let request: PageRequest = PageRequest::parse(page)?;
    let count: i64 = persistence
        .count_vets()
        .map_err(translate_persistence_error)?;
    let pagination: PageInfo = PageInfo::resolve(request, count, PAGE_SIZE)?;

    let vets: Vec<VetSummary> = persistence
        .list_vets(Some(pagination.window()))
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(vet_summary)
        .collect::<Result<_, _>>()?;

    Ok(VetListPage {
        vets,
        pagination,
        new_vet_url: paths::vet_new(),
        notice: notice_text(notice),
    })
}

fn load_vet(persistence: &mut Persistence, vet_id: i64) -> Result<VetDetails, ApiError> {
    persistence
        .get_vet_details(vet_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("Vet", vet_id))
}

/// Shows one vet with its specialties.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the vet does not exist.
pub fn get_vet_detail(
    persistence: &mut Persistence,
    vet_id: i64,
    notice: Option<Notice>,
) -> Result<VetDetailPage, ApiError> {
    let details: VetDetails = load_vet(persistence, vet_id)?;
    Ok(VetDetailPage {
        vet: vet_summary(details)?,
        notice: notice_text(notice),
    })
}

/// Builds the blank create form, or the edit form of an existing vet.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the vet to edit does not exist.
pub fn vet_form(persistence: &mut Persistence, vet_id: Option<i64>) -> Result<FormView, ApiError> {
    let specialties: Vec<Specialty> = persistence
        .list_specialties()
        .map_err(translate_persistence_error)?;

    match vet_id {
        None => Ok(render_vet_form(
            "New Veterinarian",
            &paths::vet_new(),
            &FormData::new(),
            &[],
            &specialties,
        )),
        Some(vet_id) => {
            let details: VetDetails = load_vet(persistence, vet_id)?;
            Ok(render_vet_form(
                "Edit Veterinarian",
                &paths::vet_edit(vet_id),
                &vet_values(&details.vet),
                &[],
                &specialties,
            ))
        }
    }
}

/// Creates or updates a vet from a submitted form.
///
/// The specialty set is replaced as a whole.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the vet to edit does not exist,
/// or `ApiError::Internal` if the store fails.
pub fn submit_vet_form(
    persistence: &mut Persistence,
    vet_id: Option<i64>,
    form: &FormData,
) -> Result<FormOutcome, ApiError> {
    if let Some(vet_id) = vet_id {
        load_vet(persistence, vet_id)?;
    }

    let specialties: Vec<Specialty> = persistence
        .list_specialties()
        .map_err(translate_persistence_error)?;

    let vet = match validate_vet(form, &specialties) {
        Ok(vet) => vet,
        Err(errors) => {
            warn!(count = errors.len(), "Vet form rejected");
            let (title, action) = match vet_id {
                None => ("New Veterinarian", paths::vet_new()),
                Some(vet_id) => ("Edit Veterinarian", paths::vet_edit(vet_id)),
            };
            return Ok(FormOutcome::Invalid(render_vet_form(
                title,
                &action,
                form,
                &errors,
                &specialties,
            )));
        }
    };

    match vet_id {
        None => {
            let vet_id: i64 = persistence
                .create_vet(&vet)
                .map_err(translate_persistence_error)?;
            info!(vet_id, "Veterinarian added");
            Ok(FormOutcome::Saved {
                redirect_to: paths::vet_list(),
                notice: Some(Notice::VetAdded),
            })
        }
        Some(vet_id) => {
            persistence
                .update_vet(vet_id, &vet)
                .map_err(translate_persistence_error)?;
            info!(vet_id, "Veterinarian saved");
            Ok(FormOutcome::Saved {
                redirect_to: paths::vet_detail(vet_id),
                notice: Some(Notice::VetUpdated),
            })
        }
    }
}

// ============================================================================
// Visits
// ============================================================================

/// Shows one visit with its pet and owner.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the visit does not exist.
pub fn get_visit_detail(
    persistence: &mut Persistence,
    visit_id: i64,
    notice: Option<Notice>,
) -> Result<VisitDetailPage, ApiError> {
    let details = persistence
        .get_visit_details(visit_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("Visit", visit_id))?;

    let pet_id: i64 = stored_id(details.pet.pet_id, "pet")?;
    let display: String = PetWithType {
        pet: details.pet,
        pet_type: details.pet_type,
    }
    .label();

    Ok(VisitDetailPage {
        visit: visit_info(&details.visit, &display)?,
        pet: PetRef {
            pet_id,
            display,
            url: paths::pet_detail(pet_id),
        },
        owner: owner_info(&details.owner)?,
        notice: notice_text(notice),
    })
}

/// Loads the pet a visit form is pre-bound to, with its owner.
fn load_bound_pet(
    persistence: &mut Persistence,
    pet_id: i64,
) -> Result<(PetWithType, Owner), ApiError> {
    let details: PetDetails = persistence
        .get_pet_details(pet_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("Pet", pet_id))?;
    Ok((
        PetWithType {
            pet: details.pet,
            pet_type: details.pet_type,
        },
        details.owner,
    ))
}

fn load_visit(persistence: &mut Persistence, visit_id: i64) -> Result<Visit, ApiError> {
    persistence
        .get_visit(visit_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("Visit", visit_id))
}

fn visit_form_heading(target: VisitFormTarget) -> (&'static str, String) {
    match target {
        VisitFormTarget::New { pet_id: None } => ("New Visit", paths::visit_new()),
        VisitFormTarget::New {
            pet_id: Some(pet_id),
        } => ("New Visit", paths::visit_new_for_pet(pet_id)),
        VisitFormTarget::Edit { visit_id } => ("Edit Visit", paths::visit_edit(visit_id)),
    }
}

/// Loads the pet choices, which only an unbound form shows.
fn load_visit_pet_choices(
    persistence: &mut Persistence,
    bound: Option<&(PetWithType, Owner)>,
) -> Result<Vec<PetWithType>, ApiError> {
    if bound.is_some() {
        return Ok(Vec::new());
    }
    persistence
        .list_pet_choices()
        .map_err(translate_persistence_error)
}

/// Builds a visit form. A blank form starts with today's date.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the pre-bound pet or the visit to
/// edit does not exist.
pub fn visit_form(
    persistence: &mut Persistence,
    target: VisitFormTarget,
    today: Date,
) -> Result<FormView, ApiError> {
    let (title, action) = visit_form_heading(target);

    let (values, bound): (FormData, Option<(PetWithType, Owner)>) = match target {
        VisitFormTarget::New { pet_id } => (
            new_visit_values(today),
            pet_id
                .map(|pet_id| load_bound_pet(persistence, pet_id))
                .transpose()?,
        ),
        VisitFormTarget::Edit { visit_id } => {
            (visit_values(&load_visit(persistence, visit_id)?), None)
        }
    };
    let pets: Vec<PetWithType> = load_visit_pet_choices(persistence, bound.as_ref())?;

    Ok(render_visit_form(
        title,
        &action,
        &values,
        &[],
        &pets,
        bound.as_ref().map(|(pet, owner)| (pet, owner)),
    ))
}

/// Creates or updates a visit from a submitted form.
///
/// A pre-bound pet always wins over any `pet` value in the form. Either way
/// the client is sent to the pet's page.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the pre-bound pet or the visit to
/// edit does not exist, or `ApiError::Internal` if the store fails.
pub fn submit_visit_form(
    persistence: &mut Persistence,
    target: VisitFormTarget,
    form: &FormData,
    today: Date,
) -> Result<FormOutcome, ApiError> {
    let (title, action) = visit_form_heading(target);

    let bound: Option<(PetWithType, Owner)> = match target {
        VisitFormTarget::New { pet_id } => pet_id
            .map(|pet_id| load_bound_pet(persistence, pet_id))
            .transpose()?,
        VisitFormTarget::Edit { visit_id } => {
            load_visit(persistence, visit_id)?;
            None
        }
    };
    let bound_pet_id: Option<i64> = bound.as_ref().and_then(|(pet, _)| pet.pet.pet_id);
    let pets: Vec<PetWithType> = load_visit_pet_choices(persistence, bound.as_ref())?;

    let visit: Visit = match validate_visit(form, &pets, bound_pet_id, today) {
        Ok(visit) => visit,
        Err(errors) => {
            warn!(count = errors.len(), "Visit form rejected");
            return Ok(FormOutcome::Invalid(render_visit_form(
                title,
                &action,
                form,
                &errors,
                &pets,
                bound.as_ref().map(|(pet, owner)| (pet, owner)),
            )));
        }
    };

    let notice: Notice = match target {
        VisitFormTarget::New { .. } => {
            let visit_id: i64 = persistence
                .create_visit(&visit)
                .map_err(translate_persistence_error)?;
            info!(visit_id, pet_id = visit.pet_id, "Visit scheduled");
            Notice::VisitScheduled
        }
        VisitFormTarget::Edit { visit_id } => {
            persistence
                .update_visit(visit_id, &visit)
                .map_err(translate_persistence_error)?;
            info!(visit_id, pet_id = visit.pet_id, "Visit saved");
            Notice::VisitUpdated
        }
    };

    Ok(FormOutcome::Saved {
        redirect_to: paths::pet_detail(visit.pet_id),
        notice: Some(notice),
    })
}
