// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Router tests driving the full HTTP surface.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use axum::{
    body::Body,
    http::{
        Request, StatusCode as HttpStatusCode,
        header::{CONTENT_TYPE, COOKIE, LOCATION},
    },
};
use serde_json::Value;
use tower::ServiceExt;

/// Helper to create test app state with seeded in-memory persistence.
fn create_test_app_state() -> AppState {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    persistence
        .seed_reference_data()
        .expect("Failed to seed reference data");
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    }
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

fn header<'a>(response: &'a Response, name: axum::http::HeaderName) -> Option<&'a str> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
}

const OWNER_FORM: &str = "first_name=George&last_name=Franklin&address=110+W.+Liberty+St.\
    &city=Madison&telephone=6085551023";

async fn create_owner(app: &Router, first_name: &str, last_name: &str) {
    let body: String = format!(
        "first_name={first_name}&last_name={last_name}&address=1+Main+St.\
         &city=Madison&telephone=6085550000"
    );
    let response = app
        .clone()
        .oneshot(post_form("/owners/new/", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), HttpStatusCode::SEE_OTHER);
}

// ============================================================================
// Home and Errors
// ============================================================================

#[tokio::test]
async fn test_home_page_lists_links() {
    let app: Router = build_router(create_test_app_state());
    let response = app.oneshot(get_request("/")).await.unwrap();
    assert_eq!(response.status(), HttpStatusCode::OK);

    let body: Value = body_json(response).await;
    assert_eq!(body["title"], "Welcome");
    assert_eq!(body["links"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_unknown_route_is_not_found_page() {
    let app: Router = build_router(create_test_app_state());
    let response = app.oneshot(get_request("/no/such/page/")).await.unwrap();
    assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);

    let body: Value = body_json(response).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["title"], "Page Not Found");
}

#[tokio::test]
async fn test_malformed_id_is_not_found() {
    let app: Router = build_router(create_test_app_state());
    for uri in ["/owners/abc/", "/pets/1.5/", "/vets/x/edit/", "/visits/pet/z/new/"] {
        let response = app.clone().oneshot(get_request(uri)).await.unwrap();
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_missing_owner_is_not_found() {
    let app: Router = build_router(create_test_app_state());
    let response = app.oneshot(get_request("/owners/99/")).await.unwrap();
    assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
}

// ============================================================================
// Owners
// ============================================================================

#[tokio::test]
async fn test_create_owner_redirects_to_list() {
    let app: Router = build_router(create_test_app_state());
    let response = app
        .clone()
        .oneshot(post_form("/owners/new/", OWNER_FORM))
        .await
        .unwrap();
    assert_eq!(response.status(), HttpStatusCode::SEE_OTHER);
    assert_eq!(header(&response, LOCATION), Some("/owners/"));

    let list = app.oneshot(get_request("/owners/")).await.unwrap();
    let body: Value = body_json(list).await;
    assert_eq!(body["owners"][0]["full_name"], "George Franklin");
    assert_eq!(body["pagination"]["count"], 1);
}

#[tokio::test]
async fn test_blank_owner_form_is_rerendered_with_errors() {
    let app: Router = build_router(create_test_app_state());
    let response = app
        .oneshot(post_form("/owners/new/", "first_name=&telephone="))
        .await
        .unwrap();
    assert_eq!(response.status(), HttpStatusCode::OK);

    let body: Value = body_json(response).await;
    let with_errors: usize = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|field| !field["errors"].as_array().unwrap().is_empty())
        .count();
    assert_eq!(with_errors, 5);
}

#[tokio::test]
async fn test_form_with_wrong_content_type_gets_json_error_page() {
    let app: Router = build_router(create_test_app_state());
    let request: Request<Body> = Request::builder()
        .method("POST")
        .uri("/owners/new/")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"first_name":"George"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), HttpStatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(header(&response, CONTENT_TYPE), Some("application/json"));

    let body: Value = body_json(response).await;
    assert_eq!(body["status"], 415);
    assert_eq!(body["title"], "Unsupported Media Type");
}

#[tokio::test]
async fn test_repeated_query_parameter_gets_json_error_page() {
    let app: Router = build_router(create_test_app_state());
    let response = app.oneshot(get_request("/owners/?q=jo&q=ja")).await.unwrap();
    assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(header(&response, CONTENT_TYPE), Some("application/json"));

    let body: Value = body_json(response).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["title"], "Bad Request");
}

#[tokio::test]
async fn test_owner_pages_beyond_the_last_are_not_found() {
    let app: Router = build_router(create_test_app_state());
    for i in 0..11 {
        create_owner(&app, "Pat", &format!("Owner{i:02}")).await;
    }

    let second = app.clone().oneshot(get_request("/owners/?page=2")).await.unwrap();
    assert_eq!(second.status(), HttpStatusCode::OK);
    let body: Value = body_json(second).await;
    assert_eq!(body["owners"].as_array().unwrap().len(), 1);

    let last = app.clone().oneshot(get_request("/owners/?page=last")).await.unwrap();
    assert_eq!(body_json(last).await["pagination"]["page"], 2);

    let third = app.oneshot(get_request("/owners/?page=3")).await.unwrap();
    assert_eq!(third.status(), HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_owner_search_filters_by_name() {
    let app: Router = build_router(create_test_app_state());
    create_owner(&app, "John", "Doe").await;
    create_owner(&app, "Jane", "Smith").await;

    let response = app
        .oneshot(get_request("/owners/search/?q=jo"))
        .await
        .unwrap();
    let body: Value = body_json(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["owners"][0]["full_name"], "John Doe");
}

// ============================================================================
// Pets
// ============================================================================

#[tokio::test]
async fn test_owner_scoped_pet_ignores_posted_owner() {
    let app_state: AppState = create_test_app_state();
    let app: Router = build_router(app_state.clone());
    create_owner(&app, "John", "Doe").await;
    create_owner(&app, "Jane", "Smith").await;

    let dog_id: i64 = {
        let mut persistence = app_state.persistence.lock().await;
        persistence
            .list_pet_types()
            .unwrap()
            .into_iter()
            .find(|t| t.name == "dog")
            .and_then(|t| t.pet_type_id)
            .unwrap()
    };

    let body: String = format!("name=Rex&birth_date=2020-05-05&type={dog_id}&owner=2");
    let response = app
        .clone()
        .oneshot(post_form("/pets/owner/1/new/", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), HttpStatusCode::SEE_OTHER);
    assert_eq!(header(&response, LOCATION), Some("/owners/1/"));

    let detail = app.oneshot(get_request("/owners/1/")).await.unwrap();
    let owner: Value = body_json(detail).await;
    assert_eq!(owner["pets"][0]["name"], "Rex");
    assert_eq!(owner["pets"][0]["display"], "Rex (dog)");
}

#[tokio::test]
async fn test_pet_form_for_missing_owner_is_not_found() {
    let app: Router = build_router(create_test_app_state());
    let response = app
        .oneshot(get_request("/pets/owner/42/new/"))
        .await
        .unwrap();
    assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
}

// ============================================================================
// Vets and Notices
// ============================================================================

#[tokio::test]
async fn test_vet_create_sets_notice_for_next_page() {
    let app: Router = build_router(create_test_app_state());
    let response = app
        .clone()
        .oneshot(post_form(
            "/vets/new/",
            "first_name=Helen&last_name=Leary&specialties=1&specialties=2",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), HttpStatusCode::SEE_OTHER);
    assert_eq!(header(&response, LOCATION), Some("/vets/"));
    let cookie: &str = header(&response, SET_COOKIE).unwrap();
    assert!(cookie.starts_with("petclinic_notice=vet_added;"));

    let list = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/vets/")
                .header(COOKIE, "petclinic_notice=vet_added")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(list.status(), HttpStatusCode::OK);
    let cleared: &str = header(&list, SET_COOKIE).unwrap();
    assert!(cleared.contains("Max-Age=0"));

    let body: Value = body_json(list).await;
    assert_eq!(body["notice"], "Veterinarian added successfully.");
    assert_eq!(body["vets"][0]["specialties"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unknown_notice_code_is_ignored() {
    let app: Router = build_router(create_test_app_state());
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/")
                .header(COOKIE, "theme=dark; petclinic_notice=bogus")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(header(&response, SET_COOKIE).is_some());
    let body: Value = body_json(response).await;
    assert!(body.get("notice").is_none());
}

#[tokio::test]
async fn test_page_without_notice_sets_no_cookie() {
    let app: Router = build_router(create_test_app_state());
    let response = app.oneshot(get_request("/vets/")).await.unwrap();
    assert!(header(&response, SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_vet_form_offers_sorted_specialties() {
    let app: Router = build_router(create_test_app_state());
    let response = app.oneshot(get_request("/vets/new/")).await.unwrap();
    let body: Value = body_json(response).await;

    let field: &Value = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .find(|field| field["name"] == "specialties")
        .unwrap();
    assert_eq!(field["widget"], "select_multiple");
    let labels: Vec<&str> = field["choices"]
        .as_array()
        .unwrap()
        .iter()
        .map(|choice| choice["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["dentistry", "radiology", "surgery"]);
}

// ============================================================================
// Visits
// ============================================================================

#[tokio::test]
async fn test_visit_scheduled_from_pet_page_redirects_with_notice() {
    let app_state: AppState = create_test_app_state();
    let app: Router = build_router(app_state.clone());
    create_owner(&app, "John", "Doe").await;
    app.clone()
        .oneshot(post_form(
            "/pets/owner/1/new/",
            "name=Rex&birth_date=2020-05-05&type=1",
        ))
        .await
        .unwrap();

    let visit_date: String = today().to_string();
    let response = app
        .clone()
        .oneshot(post_form(
            "/visits/pet/1/new/",
            &format!("date={visit_date}&description=checkup"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), HttpStatusCode::SEE_OTHER);
    assert_eq!(header(&response, LOCATION), Some("/pets/1/"));
    assert!(
        header(&response, SET_COOKIE)
            .unwrap()
            .starts_with("petclinic_notice=visit_scheduled;")
    );

    let form = app.oneshot(get_request("/visits/new/")).await.unwrap();
    let body: Value = body_json(form).await;
    assert_eq!(body["fields"][0]["name"], "date");
    assert_eq!(body["fields"][0]["value"], visit_date);
}
