// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The owner form.

use petclinic_domain::{
    ADDRESS_MAX_LENGTH, CITY_MAX_LENGTH, DomainError, Owner, PERSON_NAME_MAX_LENGTH,
    TELEPHONE_MAX_LENGTH, Telephone,
};

use super::{ErrorCollector, FieldErrors, FormView, Widget, clean_text, input_field};
use crate::form_data::FormData;

fn clean_telephone(form: &FormData) -> Result<Telephone, DomainError> {
    let value: String = clean_text(form, "telephone", Some(TELEPHONE_MAX_LENGTH))?;
    Telephone::new(&value)
}

/// Validates a submitted owner form.
///
/// All five fields are required.
///
/// # Errors
///
/// Returns every field error found.
pub fn validate_owner(form: &FormData) -> Result<Owner, Vec<DomainError>> {
    let mut collector: ErrorCollector = ErrorCollector::default();
    let first_name = collector.check(clean_text(form, "first_name", Some(PERSON_NAME_MAX_LENGTH)));
    let last_name = collector.check(clean_text(form, "last_name", Some(PERSON_NAME_MAX_LENGTH)));
    let address = collector.check(clean_text(form, "address", Some(ADDRESS_MAX_LENGTH)));
    let city = collector.check(clean_text(form, "city", Some(CITY_MAX_LENGTH)));
    let telephone = collector.check(clean_telephone(form));

    let (Some(first_name), Some(last_name), Some(address), Some(city), Some(telephone)) =
        (first_name, last_name, address, city, telephone)
    else {
        return Err(collector.into_errors());
    };

    Ok(Owner::new(first_name, last_name, address, city, telephone))
}

/// Returns the form values describing a stored owner.
#[must_use]
pub fn owner_values(owner: &Owner) -> FormData {
    FormData::new()
        .with("first_name", &owner.first_name)
        .with("last_name", &owner.last_name)
        .with("address", &owner.address)
        .with("city", &owner.city)
        .with("telephone", owner.telephone.value())
}

/// Renders the owner form.
#[must_use]
pub fn render_owner_form(
    title: &str,
    action: &str,
    values: &FormData,
    errors: &[DomainError],
) -> FormView {
    let errors: FieldErrors = FieldErrors::from(errors);
    FormView {
        title: title.to_string(),
        action: action.to_string(),
        fields: vec![
            input_field("first_name", "First name", Widget::Text, values, &errors),
            input_field("last_name", "Last name", Widget::Text, values, &errors),
            input_field("address", "Address", Widget::Text, values, &errors),
            input_field("city", "City", Widget::Text, values, &errors),
            input_field("telephone", "Telephone", Widget::Text, values, &errors),
        ],
        context: None,
    }
}
