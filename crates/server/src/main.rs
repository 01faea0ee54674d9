// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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
#![allow(clippy::multiple_crate_versions)]

mod extract;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State as AxumState,
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use clap::Parser;
use petclinic_api::{
    ApiError, ErrorPage, FormData, FormOutcome, FormView, PetFormTarget, VisitFormTarget,
    get_owner_detail, get_pet_detail, get_vet_detail, get_visit_detail, home_page, list_owners,
    list_vets, owner_form, pet_form, search_owners, submit_owner_form, submit_pet_form,
    submit_vet_form, submit_visit_form, vet_form, visit_form,
};
use petclinic_persistence::{Persistence, SeedSummary};
use serde::Serialize;
use time::{Date, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::extract::{
    FlashNotice, ListParams, RecordId, SubmittedForm, clear_notice_cookie, notice_cookie,
};

/// Pet Clinic Server - HTTP server for the Pet Clinic
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    bind: IpAddr,

    /// Insert the default pet types and specialties into empty tables
    #[arg(long)]
    seed: bool,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer holding every clinic record.
    persistence: Arc<Mutex<Persistence>>,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error page shown to the client.
    page: ErrorPage,
}

impl HttpError {
    fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            page: ErrorPage::not_found(),
        }
    }

    fn server_error() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            page: ErrorPage::server_error(),
        }
    }

    /// Wraps a status chosen by one of axum's own extractor rejections.
    fn rejected(status: StatusCode) -> Self {
        Self {
            status,
            page: ErrorPage::for_status(status.as_u16()),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.page)).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::ResourceNotFound { .. } => {
                debug!(error = %err, "Resource not found");
                Self::not_found()
            }
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                page: ErrorPage {
                    status: StatusCode::BAD_REQUEST.as_u16(),
                    title: String::from("Bad Request"),
                    message: err.to_string(),
                },
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self::server_error()
            }
        }
    }
}

/// Returns the current date used for date validation and ages.
fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Renders a page model, clearing the notice cookie once it has been read.
fn page_response<T: Serialize>(page: T, flash: FlashNotice) -> Response {
    if flash.present {
        ([(SET_COOKIE, clear_notice_cookie())], Json(page)).into_response()
    } else {
        Json(page).into_response()
    }
}

/// Renders the result of a form submission.
///
/// A saved record redirects with `303 See Other`; a rejected form is shown
/// again with its errors.
fn outcome_response(outcome: FormOutcome) -> Response {
    match outcome {
        FormOutcome::Saved {
            redirect_to,
            notice: Some(notice),
        } => (
            [(SET_COOKIE, notice_cookie(notice))],
            Redirect::to(&redirect_to),
        )
            .into_response(),
        FormOutcome::Saved {
            redirect_to,
            notice: None,
        } => Redirect::to(&redirect_to).into_response(),
        FormOutcome::Invalid(view) => Json(view).into_response(),
    }
}

// ============================================================================
// Home
// ============================================================================

/// Handler for GET `/`.
async fn handle_home(flash: FlashNotice) -> Response {
    page_response(home_page(flash.notice), flash)
}

/// Fallback for unknown routes.
async fn handle_not_found() -> HttpError {
    HttpError::not_found()
}

// ============================================================================
// Owners
// ============================================================================

/// Handler for GET `/owners/`.
async fn handle_list_owners(
    AxumState(app_state): AxumState<AppState>,
    query: ListParams,
    flash: FlashNotice,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let page = list_owners(
        &mut persistence,
        query.q.as_deref(),
        query.page.as_deref(),
        flash.notice,
    )?;
    drop(persistence);
    Ok(page_response(page, flash))
}

/// Handler for GET `/owners/search/`.
async fn handle_search_owners(
    AxumState(app_state): AxumState<AppState>,
    query: ListParams,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let page = search_owners(&mut persistence, query.q.as_deref())?;
    drop(persistence);
    Ok(Json(page).into_response())
}

/// Handler for GET `/owners/{id}/`.
async fn handle_owner_detail(
    AxumState(app_state): AxumState<AppState>,
    RecordId(owner_id): RecordId,
    flash: FlashNotice,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let page = get_owner_detail(&mut persistence, owner_id, today(), flash.notice)?;
    drop(persistence);
    Ok(page_response(page, flash))
}

/// Handler for GET `/owners/new/`.
async fn handle_new_owner_form(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<FormView>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(owner_form(&mut persistence, None)?))
}

/// Handler for POST `/owners/new/`.
async fn handle_create_owner(
    AxumState(app_state): AxumState<AppState>,
    SubmittedForm(form): SubmittedForm,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let outcome: FormOutcome = submit_owner_form(&mut persistence, None, &form)?;
    drop(persistence);
    Ok(outcome_response(outcome))
}

/// Handler for GET `/owners/{id}/edit/`.
async fn handle_edit_owner_form(
    AxumState(app_state): AxumState<AppState>,
    RecordId(owner_id): RecordId,
) -> Result<Json<FormView>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(owner_form(&mut persistence, Some(owner_id))?))
}

/// Handler for POST `/owners/{id}/edit/`.
async fn handle_update_owner(
    AxumState(app_state): AxumState<AppState>,
    RecordId(owner_id): RecordId,
    SubmittedForm(form): SubmittedForm,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let outcome: FormOutcome = submit_owner_form(&mut persistence, Some(owner_id), &form)?;
    drop(persistence);
    Ok(outcome_response(outcome))
}

// ============================================================================
// Pets
// ============================================================================

/// Handler for GET `/pets/{id}/`.
async fn handle_pet_detail(
    AxumState(app_state): AxumState<AppState>,
    RecordId(pet_id): RecordId,
    flash: FlashNotice,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let page = get_pet_detail(&mut persistence, pet_id, today(), flash.notice)?;
    drop(persistence);
    Ok(page_response(page, flash))
}

async fn show_pet_form(
    app_state: &AppState,
    target: PetFormTarget,
) -> Result<Json<FormView>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(pet_form(&mut persistence, target)?))
}

async fn save_pet_form(
    app_state: &AppState,
    target: PetFormTarget,
    form: FormData,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let outcome: FormOutcome = submit_pet_form(&mut persistence, target, &form, today())?;
    drop(persistence);
    Ok(outcome_response(outcome))
}

/// Handler for GET `/pets/new/`.
async fn handle_new_pet_form(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<FormView>, HttpError> {
    show_pet_form(&app_state, PetFormTarget::New { owner_id: None }).await
}

/// Handler for POST `/pets/new/`.
async fn handle_create_pet(
    AxumState(app_state): AxumState<AppState>,
    SubmittedForm(form): SubmittedForm,
) -> Result<Response, HttpError> {
    save_pet_form(&app_state, PetFormTarget::New { owner_id: None }, form).await
}

/// Handler for GET `/pets/owner/{id}/new/`.
async fn handle_new_owner_pet_form(
    AxumState(app_state): AxumState<AppState>,
    RecordId(owner_id): RecordId,
) -> Result<Json<FormView>, HttpError> {
    let target: PetFormTarget = PetFormTarget::New {
        owner_id: Some(owner_id),
    };
    show_pet_form(&app_state, target).await
}

/// Handler for POST `/pets/owner/{id}/new/`.
async fn handle_create_owner_pet(
    AxumState(app_state): AxumState<AppState>,
    RecordId(owner_id): RecordId,
    SubmittedForm(form): SubmittedForm,
) -> Result<Response, HttpError> {
    let target: PetFormTarget = PetFormTarget::New {
        owner_id: Some(owner_id),
    };
    save_pet_form(&app_state, target, form).await
}

/// Handler for GET `/pets/{id}/edit/`.
async fn handle_edit_pet_form(
    AxumState(app_state): AxumState<AppState>,
    RecordId(pet_id): RecordId,
) -> Result<Json<FormView>, HttpError> {
    show_pet_form(&app_state, PetFormTarget::Edit { pet_id }).await
}

/// Handler for POST `/pets/{id}/edit/`.
async fn handle_update_pet(
    AxumState(app_state): AxumState<AppState>,
    RecordId(pet_id): RecordId,
    SubmittedForm(form): SubmittedForm,
) -> Result<Response, HttpError> {
    save_pet_form(&app_state, PetFormTarget::Edit { pet_id }, form).await
}

// ============================================================================
// Vets
// ============================================================================

/// Handler for GET `/vets/`.
async fn handle_list_vets(
    AxumState(app_state): AxumState<AppState>,
    query: ListParams,
    flash: FlashNotice,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let page = list_vets(&mut persistence, query.page.as_deref(), flash.notice)?;
    drop(persistence);
    Ok(page_response(page, flash))
}

/// Handler for GET `/vets/{id}/`.
async fn handle_vet_detail(
    AxumState(app_state): AxumState<AppState>,
    RecordId(vet_id): RecordId,
    flash: FlashNotice,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let page = get_vet_detail(&mut persistence, vet_id, flash.notice)?;
    drop(persistence);
    Ok(page_response(page, flash))
}

/// Handler for GET `/vets/new/`.
async fn handle_new_vet_form(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<FormView>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(vet_form(&mut persistence, None)?))
}

/// Handler for POST `/vets/new/`.
async fn handle_create_vet(
    AxumState(app_state): AxumState<AppState>,
    SubmittedForm(form): SubmittedForm,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let outcome: FormOutcome = submit_vet_form(&mut persistence, None, &form)?;
    drop(persistence);
    Ok(outcome_response(outcome))
}

/// Handler for GET `/vets/{id}/edit/`.
async fn handle_edit_vet_form(
    AxumState(app_state): AxumState<AppState>,
    RecordId(vet_id): RecordId,
) -> Result<Json<FormView>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(vet_form(&mut persistence, Some(vet_id))?))
}

/// Handler for POST `/vets/{id}/edit/`.
async fn handle_update_vet(
    AxumState(app_state): AxumState<AppState>,
    RecordId(vet_id): RecordId,
    SubmittedForm(form): SubmittedForm,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let outcome: FormOutcome = submit_vet_form(&mut persistence, Some(vet_id), &form)?;
    drop(persistence);
    Ok(outcome_response(outcome))
}

// ============================================================================
// Visits
// ============================================================================

/// Handler for GET `/visits/{id}/`.
async fn handle_visit_detail(
    AxumState(app_state): AxumState<AppState>,
    RecordId(visit_id): RecordId,
    flash: FlashNotice,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let page = get_visit_detail(&mut persistence, visit_id, flash.notice)?;
    drop(persistence);
    Ok(page_response(page, flash))
}

async fn show_visit_form(
    app_state: &AppState,
    target: VisitFormTarget,
) -> Result<Json<FormView>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(visit_form(&mut persistence, target, today())?))
}

async fn save_visit_form(
    app_state: &AppState,
    target: VisitFormTarget,
    form: FormData,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let outcome: FormOutcome = submit_visit_form(&mut persistence, target, &form, today())?;
    drop(persistence);
    Ok(outcome_response(outcome))
}

/// Handler for GET `/visits/new/`.
async fn handle_new_visit_form(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<FormView>, HttpError> {
    show_visit_form(&app_state, VisitFormTarget::New { pet_id: None }).await
}

/// Handler for POST `/visits/new/`.
async fn handle_create_visit(
    AxumState(app_state): AxumState<AppState>,
    SubmittedForm(form): SubmittedForm,
) -> Result<Response, HttpError> {
    save_visit_form(&app_state, VisitFormTarget::New { pet_id: None }, form).await
}

/// Handler for GET `/visits/pet/{id}/new/`.
async fn handle_new_pet_visit_form(
    AxumState(app_state): AxumState<AppState>,
    RecordId(pet_id): RecordId,
) -> Result<Json<FormView>, HttpError> {
    let target: VisitFormTarget = VisitFormTarget::New {
        pet_id: Some(pet_id),
    };
    show_visit_form(&app_state, target).await
}

/// Handler for POST `/visits/pet/{id}/new/`.
async fn handle_create_pet_visit(
    AxumState(app_state): AxumState<AppState>,
    RecordId(pet_id): RecordId,
    SubmittedForm(form): SubmittedForm,
) -> Result<Response, HttpError> {
    let target: VisitFormTarget = VisitFormTarget::New {
        pet_id: Some(pet_id),
    };
    save_visit_form(&app_state, target, form).await
}

/// Handler for GET `/visits/{id}/edit/`.
async fn handle_edit_visit_form(
    AxumState(app_state): AxumState<AppState>,
    RecordId(visit_id): RecordId,
) -> Result<Json<FormView>, HttpError> {
    show_visit_form(&app_state, VisitFormTarget::Edit { visit_id }).await
}

/// Handler for POST `/visits/{id}/edit/`.
async fn handle_update_visit(
    AxumState(app_state): AxumState<AppState>,
    RecordId(visit_id): RecordId,
    SubmittedForm(form): SubmittedForm,
) -> Result<Response, HttpError> {
    save_visit_form(&app_state, VisitFormTarget::Edit { visit_id }, form).await
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_home))
        .route("/owners/", get(handle_list_owners))
        .route("/owners/search/", get(handle_search_owners))
        .route(
            "/owners/new/",
            get(handle_new_owner_form).post(handle_create_owner),
        )
        .route("/owners/{id}/", get(handle_owner_detail))
        .route(
            "/owners/{id}/edit/",
            get(handle_edit_owner_form).post(handle_update_owner),
        )
        .route("/pets/new/", get(handle_new_pet_form).post(handle_create_pet))
        .route(
            "/pets/owner/{id}/new/",
            get(handle_new_owner_pet_form).post(handle_create_owner_pet),
        )
        .route("/pets/{id}/", get(handle_pet_detail))
        .route(
            "/pets/{id}/edit/",
            get(handle_edit_pet_form).post(handle_update_pet),
        )
        .route("/vets/", get(handle_list_vets))
        .route("/vets/new/", get(handle_new_vet_form).post(handle_create_vet))
        .route("/vets/{id}/", get(handle_vet_detail))
        .route(
            "/vets/{id}/edit/",
            get(handle_edit_vet_form).post(handle_update_vet),
        )
        .route(
            "/visits/new/",
            get(handle_new_visit_form).post(handle_create_visit),
        )
        .route(
            "/visits/pet/{id}/new/",
            get(handle_new_pet_visit_form).post(handle_create_pet_visit),
        )
        .route("/visits/{id}/", get(handle_visit_detail))
        .route(
            "/visits/{id}/edit/",
            get(handle_edit_visit_form).post(handle_update_visit),
        )
        .fallback(handle_not_found)
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Pet Clinic Server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if args.seed {
        let summary: SeedSummary = persistence.seed_reference_data()?;
        info!(
            pet_types_added = summary.pet_types_added,
            specialties_added = summary.specialties_added,
            "Seeded reference data"
        );
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
