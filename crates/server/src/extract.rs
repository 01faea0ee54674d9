// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request extractors and the flash notice cookie.

use std::convert::Infallible;

use axum::{
    Form,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{header::COOKIE, request::Parts},
};
use petclinic_api::{FormData, Notice};
use serde::Deserialize;
use tracing::debug;

use crate::HttpError;

/// Name of the cookie carrying a notice across one redirect.
pub const NOTICE_COOKIE: &str = "petclinic_notice";

/// Lifetime of a notice cookie, in seconds.
const NOTICE_MAX_AGE: u32 = 60;

/// Builds the `Set-Cookie` value that hands a notice to the next page.
pub fn notice_cookie(notice: Notice) -> String {
    format!(
        "{NOTICE_COOKIE}={}; Path=/; Max-Age={NOTICE_MAX_AGE}; HttpOnly; SameSite=Lax",
        notice.code()
    )
}

/// Builds the `Set-Cookie` value that removes the notice cookie.
pub fn clear_notice_cookie() -> String {
    format!("{NOTICE_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

/// The notice left by the previous response, if any.
///
/// `present` is set whenever the cookie was sent, even with an unknown
/// value, so the page that reads it can clear it.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlashNotice {
    pub notice: Option<Notice>,
    pub present: bool,
}

impl<S> FromRequestParts<S> for FlashNotice
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let code: Option<&str> = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|header| header.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == NOTICE_COOKIE)
            .map(|(_, value)| value);

        let Some(code) = code else {
            return Ok(Self::default());
        };

        let notice: Option<Notice> = Notice::from_code(code);
        if notice.is_none() {
            debug!(code, "Ignoring unknown notice code");
        }
        Ok(Self {
            notice,
            present: true,
        })
    }
}

/// A record ID taken from the single `{id}` path segment.
///
/// Anything that is not an integer is treated as a missing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| HttpError::not_found())?;

        raw.parse::<i64>().map(Self).map_err(|_| {
            debug!(raw = %raw, "Malformed record ID in path");
            HttpError::not_found()
        })
    }
}

/// Query parameters of the list pages.
///
/// A malformed query string, such as a repeated `q`, is rejected with the
/// JSON error page for its status.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Owner name filter.
    pub q: Option<String>,
    /// 1-based page number, or `last`.
    pub page: Option<String>,
}

impl<S> FromRequestParts<S> for ListParams
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params): Query<Self> = Query::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                debug!(error = %rejection, "Rejected query string");
                HttpError::rejected(rejection.status())
            })?;
        Ok(params)
    }
}

/// A URL-encoded form body, in submission order.
///
/// Bodies with another content type, or that cannot be decoded, are rejected
/// with the JSON error page for the status axum assigns.
#[derive(Debug, Clone)]
pub struct SubmittedForm(pub FormData);

impl<S> FromRequest<S> for SubmittedForm
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs): Form<Vec<(String, String)>> = Form::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!(error = %rejection, "Rejected form body");
                HttpError::rejected(rejection.status())
            })?;
        Ok(Self(FormData::from_pairs(pairs)))
    }
}
