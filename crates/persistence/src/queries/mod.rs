// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `owners` — Owner list, search and detail
//! - `pets` — Pet detail and pet choices
//! - `vets` — Vet list and detail
//! - `visits` — Visit detail and per-pet history
//! - `reference` — Pet types and specialties

pub mod owners;
pub mod pets;
pub mod reference;
pub mod vets;
pub mod visits;
