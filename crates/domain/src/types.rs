// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::validation::{compute_age, validate_telephone};
use serde::{Deserialize, Serialize};
use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Maximum length of an owner's or vet's first or last name.
pub const PERSON_NAME_MAX_LENGTH: usize = 30;
/// Maximum length of an owner's street address.
pub const ADDRESS_MAX_LENGTH: usize = 255;
/// Maximum length of an owner's city.
pub const CITY_MAX_LENGTH: usize = 80;
/// Maximum length of a telephone number.
pub const TELEPHONE_MAX_LENGTH: usize = 20;
/// Maximum length of a pet's name.
pub const PET_NAME_MAX_LENGTH: usize = 30;
/// Maximum length of a pet type or specialty name.
pub const CATEGORY_NAME_MAX_LENGTH: usize = 80;

/// A telephone number restricted to digits, spaces, dashes, and parentheses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Telephone {
    value: String,
}

impl Telephone {
    /// Creates a new `Telephone` after checking its character classes.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTelephone` if any character is not a
    /// digit, space, `-`, `(` or `)`.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        validate_telephone(value)?;
        Ok(Self {
            value: value.to_string(),
        })
    }

    /// Returns the telephone text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl TryFrom<String> for Telephone {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Telephone> for String {
    fn from(telephone: Telephone) -> Self {
        telephone.value
    }
}

/// A pet-owning customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// The identifier assigned by the database. `None` until persisted.
    pub owner_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: Telephone,
}

impl Owner {
    /// Creates a new, unsaved owner.
    #[must_use]
    pub const fn new(
        first_name: String,
        last_name: String,
        address: String,
        city: String,
        telephone: Telephone,
    ) -> Self {
        Self {
            owner_id: None,
            first_name,
            last_name,
            address,
            city,
            telephone,
        }
    }

    /// Returns a copy of this owner carrying the given persisted ID.
    #[must_use]
    pub fn with_id(mut self, owner_id: i64) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// Returns `"<first_name> <last_name>"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A category of pet, such as dog or cat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetType {
    pub pet_type_id: Option<i64>,
    pub name: String,
}

impl PetType {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            pet_type_id: None,
            name: name.to_string(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, pet_type_id: i64) -> Self {
        self.pet_type_id = Some(pet_type_id);
        self
    }
}

/// An animal belonging to exactly one owner and one pet type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub pet_id: Option<i64>,
    pub name: String,
    #[serde(with = "iso_date")]
    pub birth_date: Date,
    pub pet_type_id: i64,
    pub owner_id: i64,
}

impl Pet {
    /// Creates a new, unsaved pet.
    #[must_use]
    pub const fn new(name: String, birth_date: Date, pet_type_id: i64, owner_id: i64) -> Self {
        Self {
            pet_id: None,
            name,
            birth_date,
            pet_type_id,
            owner_id,
        }
    }

    #[must_use]
    pub fn with_id(mut self, pet_id: i64) -> Self {
        self.pet_id = Some(pet_id);
        self
    }

    /// Returns the pet's age in whole years as of `today`.
    #[must_use]
    pub fn age_on(&self, today: Date) -> i32 {
        compute_age(self.birth_date, today)
    }
}

/// A veterinary area of expertise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialty {
    pub specialty_id: Option<i64>,
    pub name: String,
}

impl Specialty {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            specialty_id: None,
            name: name.to_string(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, specialty_id: i64) -> Self {
        self.specialty_id = Some(specialty_id);
        self
    }
}

/// A veterinarian with zero or more specialties.
///
/// Specialties are held by ID; the association set is rewritten as a whole
/// whenever the vet is saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vet {
    pub vet_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub specialty_ids: Vec<i64>,
}

impl Vet {
    /// Creates a new, unsaved vet. Duplicate specialty IDs are collapsed.
    #[must_use]
    pub fn new(first_name: String, last_name: String, mut specialty_ids: Vec<i64>) -> Self {
        specialty_ids.sort_unstable();
        specialty_ids.dedup();
        Self {
            vet_id: None,
            first_name,
            last_name,
            specialty_ids,
        }
    }

    #[must_use]
    pub fn with_id(mut self, vet_id: i64) -> Self {
        self.vet_id = Some(vet_id);
        self
    }

    /// Returns `"<first_name> <last_name>"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A dated clinical encounter for one pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub visit_id: Option<i64>,
    #[serde(with = "iso_date")]
    pub visit_date: Date,
    pub description: String,
    pub pet_id: i64,
}

impl Visit {
    #[must_use]
    pub const fn new(visit_date: Date, description: String, pet_id: i64) -> Self {
        Self {
            visit_id: None,
            visit_date,
            description,
            pet_id,
        }
    }

    #[must_use]
    pub fn with_id(mut self, visit_id: i64) -> Self {
        self.visit_id = Some(visit_id);
        self
    }
}

/// A normalized owner search query.
///
/// The same query drives both the paginated owner list and the search page,
/// so the two always agree on which owners match. Matching happens in the
/// store through `LIKE`, which folds case for ASCII letters only: `jo` finds
/// `John`, but `émile` does not find `Émile`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameQuery {
    text: String,
}

impl NameQuery {
    /// Builds a query from raw request text.
    ///
    /// Returns `None` when the text is absent or blank, meaning "no filter".
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let trimmed: &str = raw?.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            text: trimmed.to_string(),
        })
    }

    /// Returns the query text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns a SQL `LIKE` pattern matching the query as a substring.
    ///
    /// `%`, `_` and the escape character itself are escaped with `\`.
    #[must_use]
    pub fn like_pattern(&self) -> String {
        let mut pattern: String = String::with_capacity(self.text.len() + 2);
        pattern.push('%');
        for ch in self.text.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }
}
