// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Page models returned by the read handlers.

use serde::Serialize;

use crate::pagination::PageInfo;

/// A navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    #[must_use]
    pub fn new(label: &str, href: String) -> Self {
        Self {
            label: label.to_string(),
            href,
        }
    }
}

/// The welcome page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomePage {
    pub title: String,
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// An owner's own fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerInfo {
    pub owner_id: i64,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    pub url: String,
}

/// One row of the owner list or search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerSummary {
    #[serde(flatten)]
    pub owner: OwnerInfo,
    /// Pet names in alphabetical order.
    pub pets: Vec<String>,
}

/// The paginated owner list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerListPage {
    /// The active name filter, if any.
    pub query: Option<String>,
    pub owners: Vec<OwnerSummary>,
    pub pagination: PageInfo,
    pub new_owner_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// The unpaginated owner search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerSearchPage {
    pub query: Option<String>,
    pub owners: Vec<OwnerSummary>,
    pub count: usize,
}

/// A visit as listed under its pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitInfo {
    pub visit_id: i64,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub description: String,
    /// `"<pet display> - <date>"`.
    pub display: String,
    pub url: String,
    pub edit_url: String,
}

/// A pet with its type, age and visits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PetInfo {
    pub pet_id: i64,
    pub name: String,
    /// `YYYY-MM-DD`.
    pub birth_date: String,
    /// Whole years as of today.
    pub age: i32,
    pub pet_type: String,
    /// `"<name> (<type>)"`.
    pub display: String,
    pub url: String,
    pub edit_url: String,
    pub add_visit_url: String,
    /// Newest first.
    pub visits: Vec<VisitInfo>,
}

/// An owner with their pets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerDetailPage {
    pub owner: OwnerInfo,
    pub pets: Vec<PetInfo>,
    pub edit_url: String,
    pub add_pet_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// A pet with its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PetDetailPage {
    pub pet: PetInfo,
    pub owner: OwnerInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// A vet with its specialty names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VetSummary {
    pub vet_id: i64,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    /// Ordered by name.
    pub specialties: Vec<String>,
    pub url: String,
    pub edit_url: String,
}

/// The paginated vet list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VetListPage {
    pub vets: Vec<VetSummary>,
    pub pagination: PageInfo,
    pub new_vet_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// A single vet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VetDetailPage {
    pub vet: VetSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// A short reference to a pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PetRef {
    pub pet_id: i64,
    pub display: String,
    pub url: String,
}

/// A single visit with its pet and owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitDetailPage {
    pub visit: VisitInfo,
    pub pet: PetRef,
    pub owner: OwnerInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// A static error page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPage {
    pub status: u16,
    pub title: String,
    pub message: String,
}

impl ErrorPage {
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            status: 404,
            title: String::from("Page Not Found"),
            message: String::from("The page you requested could not be found."),
        }
    }

    #[must_use]
    pub fn server_error() -> Self {
        Self {
            status: 500,
            title: String::from("Server Error"),
            message: String::from("Something went wrong on our end. Please try again later."),
        }
    }

    /// Returns the static page for an HTTP error status.
    ///
    /// Unlisted client errors share a generic page; every 5xx status gets
    /// the server error text.
    #[must_use]
    pub fn for_status(status: u16) -> Self {
        let (title, message): (&str, &str) = match status {
            400 => ("Bad Request", "The request could not be understood."),
            403 => ("Access Denied", "You do not have permission to view this page."),
            404 => return Self::not_found(),
            415 => (
                "Unsupported Media Type",
                "Forms must be submitted as application/x-www-form-urlencoded.",
            ),
            422 => ("Unprocessable Entity", "The submitted data could not be read."),
            500..=599 => {
                return Self {
                    status,
                    ..Self::server_error()
                };
            }
            _ => ("Request Error", "The request could not be processed."),
        };
        Self {
            status,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}
