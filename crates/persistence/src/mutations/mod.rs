// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! Every mutation that touches more than one row runs inside a single
//! transaction, so a failed save leaves no partial data behind.

pub mod owners;
pub mod pets;
pub mod reference;
pub mod vets;
pub mod visits;
