// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Page URLs used in links and redirects.

#[must_use]
pub fn home() -> String {
    String::from("/")
}

#[must_use]
pub fn owner_list() -> String {
    String::from("/owners/")
}

#[must_use]
pub fn owner_search() -> String {
    String::from("/owners/search/")
}

#[must_use]
pub fn owner_new() -> String {
    String::from("/owners/new/")
}

#[must_use]
pub fn owner_detail(owner_id: i64) -> String {
    format!("/owners/{owner_id}/")
}

#[must_use]
pub fn owner_edit(owner_id: i64) -> String {
    format!("/owners/{owner_id}/edit/")
}

#[must_use]
pub fn pet_new() -> String {
    String::from("/pets/new/")
}

/// The pet form pre-bound to an owner.
#[must_use]
pub fn pet_new_for_owner(owner_id: i64) -> String {
    format!("/pets/owner/{owner_id}/new/")
}

#[must_use]
pub fn pet_detail(pet_id: i64) -> String {
    format!("/pets/{pet_id}/")
}

#[must_use]
pub fn pet_edit(pet_id: i64) -> String {
    format!("/pets/{pet_id}/edit/")
}

#[must_use]
pub fn vet_list() -> String {
    String::from("/vets/")
}

#[must_use]
pub fn vet_new() -> String {
    String::from("/vets/new/")
}

#[must_use]
pub fn vet_detail(vet_id: i64) -> String {
    format!("/vets/{vet_id}/")
}

#[must_use]
pub fn vet_edit(vet_id: i64) -> String {
    format!("/vets/{vet_id}/edit/")
}

#[must_use]
pub fn visit_new() -> String {
    String::from("/visits/new/")
}

/// The visit form pre-bound to a pet.
#[must_use]
pub fn visit_new_for_pet(pet_id: i64) -> String {
    format!("/visits/pet/{pet_id}/new/")
}

#[must_use]
pub fn visit_detail(visit_id: i64) -> String {
    format!("/visits/{visit_id}/")
}

#[must_use]
pub fn visit_edit(visit_id: i64) -> String {
    format!("/visits/{visit_id}/edit/")
}
