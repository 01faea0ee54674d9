// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use petclinic_domain::DomainError;
use petclinic_persistence::PersistenceError;

use crate::pagination::PaginationError;

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// contract the HTTP layer maps to status codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Builds a `ResourceNotFound` for a record looked up by ID.
    #[must_use]
    pub fn not_found(resource_type: &str, id: i64) -> Self {
        Self::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message: format!("{resource_type} with ID {id} does not exist"),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PaginationError> for ApiError {
    fn from(err: PaginationError) -> Self {
        Self::ResourceNotFound {
            resource_type: String::from("Page"),
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// Every domain rule is a field rule, so the result is always
/// `InvalidInput` keyed by the form field. The message is the text shown
/// next to that field.
#[must_use]
pub fn translate_domain_error(err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: err.field().to_string(),
        message: err.to_string(),
    }
}

/// Translates a persistence error into an API error.
///
/// Only `NotFound` is meaningful to a client. Everything else is an
/// internal fault whose detail stays in the logs.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
