// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and field rules for the Pet Clinic.
//!
//! Everything in this crate is pure: no I/O, no clock. Rules that depend on
//! the current date take `today` as an argument.

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

mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::{DateField, DomainError};
pub use types::{
    ADDRESS_MAX_LENGTH, CATEGORY_NAME_MAX_LENGTH, CITY_MAX_LENGTH, NameQuery, Owner,
    PERSON_NAME_MAX_LENGTH, PET_NAME_MAX_LENGTH, Pet, PetType, Specialty, TELEPHONE_MAX_LENGTH,
    Telephone, Vet, Visit,
};
pub use validation::{
    compute_age, parse_input_date, validate_max_length, validate_not_in_future,
    validate_required, validate_telephone,
};
