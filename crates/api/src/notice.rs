// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One-shot confirmation messages shown after a redirect.

/// A confirmation notice, identified on the wire by its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    VetAdded,
    VetUpdated,
    VisitScheduled,
    VisitUpdated,
}

impl Notice {
    const ALL: [Self; 4] = [
        Self::VetAdded,
        Self::VetUpdated,
        Self::VisitScheduled,
        Self::VisitUpdated,
    ];

    /// Returns the stable code stored in the notice cookie.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::VetAdded => "vet_added",
            Self::VetUpdated => "vet_updated",
            Self::VisitScheduled => "visit_scheduled",
            Self::VisitUpdated => "visit_updated",
        }
    }

    /// Returns the text shown to the user.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::VetAdded => "Veterinarian added successfully.",
            Self::VetUpdated => "Veterinarian updated successfully.",
            Self::VisitScheduled => "Visit scheduled successfully.",
            Self::VisitUpdated => "Visit updated successfully.",
        }
    }

    /// Looks a notice up by code. Unknown codes yield `None`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|notice| notice.code() == code)
    }
}
