// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Page selection for list pages.

use petclinic_persistence::PageWindow;
use serde::Serialize;
use thiserror::Error;

/// Number of records on one list page.
pub const PAGE_SIZE: i64 = 10;

/// Reasons a requested page cannot be served.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    /// The page parameter is neither an integer nor `last`.
    #[error("Page '{0}' is not a number")]
    NotANumber(String),

    /// The page number is below 1.
    #[error("Page number {0} is less than 1")]
    LessThanOne(i64),

    /// The page number is past the last page.
    #[error("Page {requested} contains no results (there are {num_pages} page(s))")]
    Empty { requested: i64, num_pages: i64 },
}

/// The page asked for by the `page` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    /// A 1-based page number.
    Number(i64),
    /// The final page, whatever its number.
    Last,
}

impl PageRequest {
    /// Parses the raw `page` parameter. Absent or blank means page 1.
    ///
    /// # Errors
    ///
    /// Returns `PaginationError::NotANumber` for anything else that is not
    /// an integer or `last`.
    pub fn parse(raw: Option<&str>) -> Result<Self, PaginationError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::Number(1)),
            Some("last") => Ok(Self::Last),
            Some(text) => text
                .parse::<i64>()
                .map(Self::Number)
                .map_err(|_| PaginationError::NotANumber(text.to_string())),
        }
    }
}

/// Pagination metadata carried by list pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: i64,
    pub num_pages: i64,
    pub count: i64,
    pub page_size: i64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageInfo {
    /// Resolves a page request against a total record count.
    ///
    /// An empty listing still has one (empty) page.
    ///
    /// # Errors
    ///
    /// Returns a `PaginationError` if the page is below 1 or past the end.
    pub fn resolve(
        request: PageRequest,
        count: i64,
        page_size: i64,
    ) -> Result<Self, PaginationError> {
        let num_pages: i64 = ((count + page_size - 1) / page_size).max(1);
        let page: i64 = match request {
            PageRequest::Last => num_pages,
            PageRequest::Number(n) if n < 1 => return Err(PaginationError::LessThanOne(n)),
            PageRequest::Number(n) if n > num_pages => {
                return Err(PaginationError::Empty {
                    requested: n,
                    num_pages,
                });
            }
            PageRequest::Number(n) => n,
        };

        Ok(Self {
            page,
            num_pages,
            count,
            page_size,
            has_previous: page > 1,
            has_next: page < num_pages,
        })
    }

    /// Returns the slice of the ordered listing this page covers.
    #[must_use]
    pub const fn window(&self) -> PageWindow {
        PageWindow {
            limit: self.page_size,
            offset: (self.page - 1) * self.page_size,
        }
    }
}
