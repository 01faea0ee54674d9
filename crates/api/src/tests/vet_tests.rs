// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vet page and form handler tests.

use petclinic_persistence::Persistence;

use crate::{
    ApiError, FormData, FormOutcome, FormView, Notice, VetDetailPage, VetListPage,
    get_vet_detail, list_vets, submit_vet_form, vet_form,
};

use super::helpers::{
    add_vet, create_test_persistence, expect_invalid, field_errors, specialty_id,
};

#[test]
fn test_vet_list_shows_specialties_by_name() {
    let mut persistence: Persistence = create_test_persistence();
    let surgery: i64 = specialty_id(&mut persistence, "surgery");
    let dentistry: i64 = specialty_id(&mut persistence, "dentistry");
    add_vet(&mut persistence, "Linda", "Douglas", vec![surgery, dentistry]);
    add_vet(&mut persistence, "James", "Carter", Vec::new());

    let page: VetListPage = list_vets(&mut persistence, None, None).unwrap();
    let names: Vec<&str> = page.vets.iter().map(|v| v.full_name.as_str()).collect();
    assert_eq!(names, vec!["James Carter", "Linda Douglas"]);
    assert!(page.vets[0].specialties.is_empty());
    assert_eq!(page.vets[1].specialties, vec!["dentistry", "surgery"]);
    assert_eq!(page.new_vet_url, "/vets/new/");
}

#[test]
fn test_blank_vet_submission_reports_two_errors() {
    let mut persistence: Persistence = create_test_persistence();
    let view: FormView =
        expect_invalid(submit_vet_form(&mut persistence, None, &FormData::new()).unwrap());
    assert_eq!(view.error_count(), 2);
    assert_eq!(view.title, "New Veterinarian");
}

#[test]
fn test_created_vet_redirects_to_list_with_notice() {
    let mut persistence: Persistence = create_test_persistence();
    let radiology: i64 = specialty_id(&mut persistence, "radiology");
    let form: FormData = FormData::new()
        .with("first_name", "Helen")
        .with("last_name", "Leary")
        .with("specialties", &radiology.to_string());

    let outcome: FormOutcome = submit_vet_form(&mut persistence, None, &form).unwrap();
    assert_eq!(
        outcome,
        FormOutcome::Saved {
            redirect_to: String::from("/vets/"),
            notice: Some(Notice::VetAdded),
        }
    );

    let page: VetListPage = list_vets(&mut persistence, None, None).unwrap();
    assert_eq!(page.vets[0].specialties, vec!["radiology"]);
}

#[test]
fn test_updated_vet_replaces_specialties() {
    let mut persistence: Persistence = create_test_persistence();
    let surgery: i64 = specialty_id(&mut persistence, "surgery");
    let dentistry: i64 = specialty_id(&mut persistence, "dentistry");
    let vet_id: i64 = add_vet(&mut persistence, "Rafael", "Ortega", vec![surgery]);

    let form: FormData = FormData::new()
        .with("first_name", "Rafael")
        .with("last_name", "Ortega")
        .with("specialties", &dentistry.to_string());
    let outcome: FormOutcome = submit_vet_form(&mut persistence, Some(vet_id), &form).unwrap();
    assert_eq!(
        outcome,
        FormOutcome::Saved {
            redirect_to: format!("/vets/{vet_id}/"),
            notice: Some(Notice::VetUpdated),
        }
    );

    let page: VetDetailPage =
        get_vet_detail(&mut persistence, vet_id, Some(Notice::VetUpdated)).unwrap();
    assert_eq!(page.vet.specialties, vec!["dentistry"]);
    assert_eq!(
        page.notice.as_deref(),
        Some("Veterinarian updated successfully.")
    );
}

#[test]
fn test_clearing_every_specialty_is_allowed() {
    let mut persistence: Persistence = create_test_persistence();
    let surgery: i64 = specialty_id(&mut persistence, "surgery");
    let vet_id: i64 = add_vet(&mut persistence, "Rafael", "Ortega", vec![surgery]);

    let form: FormData = FormData::new()
        .with("first_name", "Rafael")
        .with("last_name", "Ortega");
    submit_vet_form(&mut persistence, Some(vet_id), &form).unwrap();

    let page: VetDetailPage = get_vet_detail(&mut persistence, vet_id, None).unwrap();
    assert!(page.vet.specialties.is_empty());
}

#[test]
fn test_unknown_specialty_is_reported_against_field() {
    let mut persistence: Persistence = create_test_persistence();
    let form: FormData = FormData::new()
        .with("first_name", "Sharon")
        .with("last_name", "Jenkins")
        .with("specialties", "999");

    let view: FormView = expect_invalid(submit_vet_form(&mut persistence, None, &form).unwrap());
    assert_eq!(
        field_errors(&view, "specialties"),
        vec![String::from(
            "Select a valid choice. 999 is not one of the available choices."
        )]
    );
    assert_eq!(persistence.count_vets().unwrap(), 0);
}

#[test]
fn test_vet_form_lists_specialties_by_name() {
    let mut persistence: Persistence = create_test_persistence();
    let view: FormView = vet_form(&mut persistence, None).unwrap();
    let labels: Vec<&str> = view
        .field("specialties")
        .unwrap()
        .choices
        .iter()
        .map(|c| c.label.as_str())
        .collect();
    assert_eq!(labels, vec!["dentistry", "radiology", "surgery"]);
}

#[test]
fn test_missing_vet_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(matches!(
        get_vet_detail(&mut persistence, 3, None),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        vet_form(&mut persistence, Some(3)),
        Err(ApiError::ResourceNotFound { .. })
    ));
}
