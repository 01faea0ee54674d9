// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use petclinic_domain::{NameQuery, Owner, Telephone};
use time::Month;

use super::{
    create_test_owner, create_test_persistence_with_dog, create_test_pet, create_test_visit, date,
};
use crate::{PageWindow, Persistence, PersistenceError};

fn listed_names(persistence: &mut Persistence, query: Option<&NameQuery>) -> Vec<String> {
    persistence
        .list_owners(query, None)
        .unwrap()
        .into_iter()
        .map(|listing| listing.owner.full_name())
        .collect()
}

#[test]
fn test_create_and_get_owner() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let owner_id = persistence
        .create_owner(&create_test_owner("George", "Franklin"))
        .unwrap();

    let owner = persistence.get_owner(owner_id).unwrap().unwrap();
    assert_eq!(owner.owner_id, Some(owner_id));
    assert_eq!(owner.full_name(), "George Franklin");
    assert_eq!(owner.telephone.value(), "608-555-1023");
}

#[test]
fn test_get_missing_owner_returns_none() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.get_owner(42).unwrap().is_none());
    assert!(persistence.get_owner_details(42).unwrap().is_none());
}

#[test]
fn test_update_owner_overwrites_fields() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let owner_id = persistence
        .create_owner(&create_test_owner("George", "Franklin"))
        .unwrap();

    let changed = Owner::new(
        String::from("Georgina"),
        String::from("Franklin"),
        String::from("638 Cardinal Ave."),
        String::from("Sun Prairie"),
        Telephone::new("(608) 555 1749").unwrap(),
    );
    persistence.update_owner(owner_id, &changed).unwrap();

    let owner = persistence.get_owner(owner_id).unwrap().unwrap();
    assert_eq!(owner, changed.with_id(owner_id));
}

#[test]
fn test_update_missing_owner_is_not_found() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let result = persistence.update_owner(7, &create_test_owner("Nobody", "Here"));
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_owners_are_ordered_by_last_then_first_name() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence.create_owner(&create_test_owner("Zed", "Adams")).unwrap();
    persistence.create_owner(&create_test_owner("Amy", "Baker")).unwrap();
    persistence.create_owner(&create_test_owner("Bob", "Adams")).unwrap();

    assert_eq!(
        listed_names(&mut persistence, None),
        vec!["Bob Adams", "Zed Adams", "Amy Baker"]
    );
}

#[test]
fn test_owner_filter_matches_first_or_last_name_ignoring_case() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence.create_owner(&create_test_owner("Jean", "Coleman")).unwrap();
    persistence.create_owner(&create_test_owner("Harold", "Davis")).unwrap();
    persistence.create_owner(&create_test_owner("Colette", "Black")).unwrap();

    let query = NameQuery::parse(Some("COL")).unwrap();
    assert_eq!(
        listed_names(&mut persistence, Some(&query)),
        vec!["Colette Black", "Jean Coleman"]
    );
    assert_eq!(persistence.count_owners(Some(&query)).unwrap(), 2);

    let query = NameQuery::parse(Some("zzz")).unwrap();
    assert!(listed_names(&mut persistence, Some(&query)).is_empty());
    assert_eq!(persistence.count_owners(Some(&query)).unwrap(), 0);
}

#[test]
fn test_owner_filter_folds_ascii_case_only() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence.create_owner(&create_test_owner("John", "Doe")).unwrap();
    persistence.create_owner(&create_test_owner("Jane", "Smith")).unwrap();
    persistence.create_owner(&create_test_owner("Émile", "Zola")).unwrap();

    let query = NameQuery::parse(Some("jo")).unwrap();
    assert_eq!(listed_names(&mut persistence, Some(&query)), vec!["John Doe"]);
    assert_eq!(persistence.count_owners(Some(&query)).unwrap(), 1);

    let query = NameQuery::parse(Some("émile")).unwrap();
    assert!(listed_names(&mut persistence, Some(&query)).is_empty());
    assert_eq!(persistence.count_owners(Some(&query)).unwrap(), 0);

    let query = NameQuery::parse(Some("ÉMILE")).unwrap();
    assert_eq!(listed_names(&mut persistence, Some(&query)), vec!["Émile Zola"]);
    assert_eq!(persistence.count_owners(Some(&query)).unwrap(), 1);
}

#[test]
fn test_owner_filter_treats_wildcards_literally() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence.create_owner(&create_test_owner("Sean", "O_Neil")).unwrap();
    persistence.create_owner(&create_test_owner("Maria", "Escobito")).unwrap();

    let underscore = NameQuery::parse(Some("_")).unwrap();
    assert_eq!(
        listed_names(&mut persistence, Some(&underscore)),
        vec!["Sean O_Neil"]
    );

    let percent = NameQuery::parse(Some("%")).unwrap();
    assert!(listed_names(&mut persistence, Some(&percent)).is_empty());
}

#[test]
fn test_owner_window_slices_the_ordered_list() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    for index in 0..11 {
        persistence
            .create_owner(&create_test_owner("Owner", &format!("Number{index:02}")))
            .unwrap();
    }

    assert_eq!(persistence.count_owners(None).unwrap(), 11);

    let first_page = persistence
        .list_owners(None, Some(PageWindow { limit: 10, offset: 0 }))
        .unwrap();
    assert_eq!(first_page.len(), 10);
    assert_eq!(first_page[0].owner.last_name, "Number00");

    let second_page = persistence
        .list_owners(None, Some(PageWindow { limit: 10, offset: 10 }))
        .unwrap();
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].owner.last_name, "Number10");
}

#[test]
fn test_owner_listing_carries_sorted_pet_names() {
    let (mut persistence, dog_id) = create_test_persistence_with_dog();
    let owner_id = persistence
        .create_owner(&create_test_owner("Eduardo", "Rodriquez"))
        .unwrap();
    persistence.create_pet(&create_test_pet("Rosy", dog_id, owner_id)).unwrap();
    persistence.create_pet(&create_test_pet("Jewel", dog_id, owner_id)).unwrap();
    persistence
        .create_owner(&create_test_owner("Peter", "McTavish"))
        .unwrap();

    let listings = persistence.list_owners(None, None).unwrap();
    assert_eq!(listings[0].owner.last_name, "McTavish");
    assert!(listings[0].pet_names.is_empty());
    assert_eq!(listings[1].pet_names, vec!["Jewel", "Rosy"]);
}

#[test]
fn test_owner_details_include_pets_and_visits() {
    let (mut persistence, dog_id) = create_test_persistence_with_dog();
    let owner_id = persistence
        .create_owner(&create_test_owner("Jean", "Coleman"))
        .unwrap();
    let samantha = persistence
        .create_pet(&create_test_pet("Samantha", dog_id, owner_id))
        .unwrap();
    let max = persistence
        .create_pet(&create_test_pet("Max", dog_id, owner_id))
        .unwrap();
    persistence
        .create_visit(&create_test_visit(date(2024, Month::March, 4), "rabies shot", samantha))
        .unwrap();
    persistence
        .create_visit(&create_test_visit(date(2024, Month::June, 4), "neutered", samantha))
        .unwrap();

    let details = persistence.get_owner_details(owner_id).unwrap().unwrap();
    assert_eq!(details.owner.full_name(), "Jean Coleman");
    assert_eq!(details.pets.len(), 2);
    assert_eq!(details.pets[0].pet.pet_id, Some(max));
    assert!(details.pets[0].visits.is_empty());
    assert_eq!(details.pets[1].pet.pet_id, Some(samantha));
    assert_eq!(details.pets[1].pet_type.name, "dog");
    let descriptions: Vec<&str> = details.pets[1]
        .visits
        .iter()
        .map(|v| v.description.as_str())
        .collect();
    assert_eq!(descriptions, vec!["neutered", "rabies shot"]);
}

#[test]
fn test_delete_owner_cascades_to_pets_and_visits() {
    let (mut persistence, dog_id) = create_test_persistence_with_dog();
    let owner_id = persistence
        .create_owner(&create_test_owner("Jeff", "Black"))
        .unwrap();
    let pet_id = persistence
        .create_pet(&create_test_pet("Lucky", dog_id, owner_id))
        .unwrap();
    let visit_id = persistence
        .create_visit(&create_test_visit(date(2024, Month::May, 1), "checkup", pet_id))
        .unwrap();

    persistence.delete_owner(owner_id).unwrap();

    assert!(persistence.get_owner(owner_id).unwrap().is_none());
    assert!(persistence.get_pet(pet_id).unwrap().is_none());
    assert!(persistence.get_visit(visit_id).unwrap().is_none());
    assert_eq!(persistence.list_pet_types().unwrap().len(), 1);
}

#[test]
fn test_delete_missing_owner_is_not_found() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(matches!(
        persistence.delete_owner(3),
        Err(PersistenceError::NotFound(_))
    ));
}
