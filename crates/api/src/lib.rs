// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Page and form handling for the Pet Clinic.
//!
//! This crate sits between the HTTP server and persistence. Read handlers
//! return serializable page models; submit handlers validate a form and
//! either save the record or return the form with its field errors.
//! Nothing here knows about HTTP beyond paths.

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

mod error;
mod form_data;
pub mod forms;
mod handlers;
mod notice;
mod pagination;
pub mod paths;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_domain_error, translate_persistence_error};
pub use form_data::FormData;
pub use forms::{Choice, FieldValue, FieldView, FormContext, FormView, Widget};
pub use handlers::{
    FormOutcome, PetFormTarget, VisitFormTarget, get_owner_detail, get_pet_detail,
    get_vet_detail, get_visit_detail, home_page, list_owners, list_vets, owner_form, pet_form,
    search_owners, submit_owner_form, submit_pet_form, submit_vet_form, submit_visit_form,
    vet_form, visit_form,
};
pub use notice::Notice;
pub use pagination::{PAGE_SIZE, PageInfo, PageRequest, PaginationError};
pub use request_response::{
    ErrorPage, HomePage, Link, OwnerDetailPage, OwnerInfo, OwnerListPage, OwnerSearchPage,
    OwnerSummary, PetDetailPage, PetInfo, PetRef, VetDetailPage, VetListPage, VetSummary,
    VisitDetailPage, VisitInfo,
};
