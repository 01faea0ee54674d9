// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pet page and form handler tests.

use petclinic_domain::Pet;
use petclinic_persistence::Persistence;
use time::macros::date;

use crate::{
    ApiError, FormContext, FormData, FormOutcome, FormView, PetDetailPage, PetFormTarget,
    Widget, get_pet_detail, pet_form, submit_pet_form,
};

use super::helpers::{
    TODAY, add_owner, add_pet, create_test_persistence, expect_invalid, field_errors,
    pet_type_id,
};

fn pet_submission(persistence: &mut Persistence, name: &str, owner: &str) -> FormData {
    let cat_id: i64 = pet_type_id(persistence, "cat");
    FormData::new()
        .with("name", name)
        .with("birth_date", "2024-11-30")
        .with("type", &cat_id.to_string())
        .with("owner", owner)
}

#[test]
fn test_blank_pet_submission_reports_four_errors() {
    let mut persistence: Persistence = create_test_persistence();
    let view: FormView = expect_invalid(
        submit_pet_form(
            &mut persistence,
            PetFormTarget::New { owner_id: None },
            &FormData::new(),
            TODAY,
        )
        .unwrap(),
    );
    assert_eq!(view.error_count(), 4);
}

#[test]
fn test_pet_created_from_owner_page_ignores_posted_owner() {
    let mut persistence: Persistence = create_test_persistence();
    let owner_id: i64 = add_owner(&mut persistence, "Jean", "Coleman");
    let other_id: i64 = add_owner(&mut persistence, "Maria", "Escobito");
    let form: FormData = pet_submission(&mut persistence, "Samantha", &other_id.to_string());

    let outcome: FormOutcome = submit_pet_form(
        &mut persistence,
        PetFormTarget::New {
            owner_id: Some(owner_id),
        },
        &form,
        TODAY,
    )
    .unwrap();
    assert_eq!(
        outcome,
        FormOutcome::Saved {
            redirect_to: format!("/owners/{owner_id}/"),
            notice: None,
        }
    );

    let details = persistence.get_owner_details(owner_id).unwrap().unwrap();
    assert_eq!(details.pets.len(), 1);
    assert_eq!(details.pets[0].pet.name, "Samantha");
    let other = persistence.get_owner_details(other_id).unwrap().unwrap();
    assert!(other.pets.is_empty());
}

#[test]
fn test_pet_created_without_owner_uses_posted_owner() {
    let mut persistence: Persistence = create_test_persistence();
    let owner_id: i64 = add_owner(&mut persistence, "Jean", "Coleman");
    let form: FormData = pet_submission(&mut persistence, "Max", &owner_id.to_string());

    let outcome: FormOutcome = submit_pet_form(
        &mut persistence,
        PetFormTarget::New { owner_id: None },
        &form,
        TODAY,
    )
    .unwrap();
    assert!(matches!(outcome, FormOutcome::Saved { .. }));
    assert_eq!(persistence.list_pet_choices().unwrap().len(), 1);
}

#[test]
fn test_pet_form_for_missing_owner_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let target: PetFormTarget = PetFormTarget::New { owner_id: Some(77) };
    assert!(matches!(
        pet_form(&mut persistence, target),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        submit_pet_form(&mut persistence, target, &FormData::new(), TODAY),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_bound_pet_form_shows_owner_context() {
    let mut persistence: Persistence = create_test_persistence();
    let owner_id: i64 = add_owner(&mut persistence, "Jean", "Coleman");
    let view: FormView = pet_form(
        &mut persistence,
        PetFormTarget::New {
            owner_id: Some(owner_id),
        },
    )
    .unwrap();

    assert_eq!(view.action, format!("/pets/owner/{owner_id}/new/"));
    assert_eq!(view.field("owner").unwrap().widget, Widget::Hidden);
    assert!(matches!(view.context, Some(FormContext::Owner { .. })));

    let type_labels: Vec<&str> = view
        .field("type")
        .unwrap()
        .choices
        .iter()
        .map(|c| c.label.as_str())
        .collect();
    assert_eq!(
        type_labels,
        vec!["---------", "bird", "cat", "dog", "hamster", "lizard", "snake"]
    );
}

#[test]
fn test_future_birth_date_is_rejected_on_submit() {
    let mut persistence: Persistence = create_test_persistence();
    let owner_id: i64 = add_owner(&mut persistence, "Jean", "Coleman");
    let form: FormData = FormData::new()
        .with("name", "Basil")
        .with("birth_date", "2027-01-01")
        .with("type", &pet_type_id(&mut persistence, "hamster").to_string());

    let view: FormView = expect_invalid(
        submit_pet_form(
            &mut persistence,
            PetFormTarget::New {
                owner_id: Some(owner_id),
            },
            &form,
            TODAY,
        )
        .unwrap(),
    );
    assert_eq!(
        field_errors(&view, "birth_date"),
        vec![String::from("Birth date cannot be in the future")]
    );
    assert_eq!(view.error_count(), 1);
}

#[test]
fn test_editing_pet_can_move_it_to_another_owner() {
    let mut persistence: Persistence = create_test_persistence();
    let owner_id: i64 = add_owner(&mut persistence, "Jean", "Coleman");
    let new_owner_id: i64 = add_owner(&mut persistence, "Maria", "Escobito");
    let pet_id: i64 = add_pet(&mut persistence, "Mulligan", "dog", owner_id);
    let form: FormData = pet_submission(&mut persistence, "Mulligan", &new_owner_id.to_string());

    let outcome: FormOutcome =
        submit_pet_form(&mut persistence, PetFormTarget::Edit { pet_id }, &form, TODAY).unwrap();
    assert_eq!(
        outcome,
        FormOutcome::Saved {
            redirect_to: format!("/owners/{new_owner_id}/"),
            notice: None,
        }
    );

    let pet: Pet = persistence.get_pet(pet_id).unwrap().unwrap();
    assert_eq!(pet.owner_id, new_owner_id);
    assert_eq!(pet.birth_date, date!(2024 - 11 - 30));
}

#[test]
fn test_pet_detail_shows_owner_and_age() {
    let mut persistence: Persistence = create_test_persistence();
    let owner_id: i64 = add_owner(&mut persistence, "Jean", "Coleman");
    let pet_id: i64 = add_pet(&mut persistence, "Max", "cat", owner_id);

    let page: PetDetailPage = get_pet_detail(&mut persistence, pet_id, TODAY, None).unwrap();
    assert_eq!(page.pet.display, "Max (cat)");
    assert_eq!(page.pet.age, 5);
    assert_eq!(page.pet.add_visit_url, format!("/visits/pet/{pet_id}/new/"));
    assert_eq!(page.owner.owner_id, owner_id);
    assert!(page.pet.visits.is_empty());
}

#[test]
fn test_pet_detail_of_missing_pet_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(matches!(
        get_pet_detail(&mut persistence, 1, TODAY, None),
        Err(ApiError::ResourceNotFound { .. })
    ));
}
