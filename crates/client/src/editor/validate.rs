//! Product draft validation.
//!
//! Runs before any network call; a non-empty result blocks submission.
//! Deleted entries are skipped - they exist only as pending delete
//! instructions and are never shown in an edit affordance.

use rust_decimal::Decimal;

use crate::validate::{ValidationCode, ValidationError};

use super::draft::ProductDraft;

const MAX_NAME: usize = 255;

/// Check every field and cross-field constraint of a draft.
///
/// Returns all violations, in field order, so a form can surface them
/// inline at once.
#[must_use]
pub fn validate_draft(draft: &ProductDraft) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if draft.category.is_none() {
        errors.push(ValidationError::new("category_id", ValidationCode::Required));
    }

    check_text(&mut errors, "sku", &draft.sku, MAX_NAME);
    check_text(&mut errors, "name", &draft.name, MAX_NAME);
    if draft.description.is_empty() {
        errors.push(ValidationError::new("description", ValidationCode::Required));
    }

    if draft.dimensions.weight < Decimal::ZERO {
        errors.push(ValidationError::new(
            "dimensions.weight",
            ValidationCode::NonNegative,
        ));
    }

    for (position, variant) in draft.variants.active() {
        check_text(
            &mut errors,
            &format!("variants.{position}.name"),
            &variant.name,
            MAX_NAME,
        );
        if variant.price < Decimal::ZERO {
            errors.push(ValidationError::new(
                format!("variants.{position}.price"),
                ValidationCode::NonNegative,
            ));
        }
    }

    // Multi-variant products must keep at least one live variant.
    if draft.use_variant && draft.variants.active_len() == 0 {
        errors.push(ValidationError::new(
            "variants",
            ValidationCode::AtLeastOneVariant,
        ));
    }

    for (position, attribute) in draft.attributes.active() {
        check_text(
            &mut errors,
            &format!("attributes.{position}.name"),
            &attribute.name,
            MAX_NAME,
        );
        if attribute.values.is_empty() {
            errors.push(ValidationError::new(
                format!("attributes.{position}.lists"),
                ValidationCode::AtLeastOneValue,
            ));
        }
    }

    for (position, information) in draft.informations.active() {
        check_text(
            &mut errors,
            &format!("informations.{position}.name"),
            &information.name,
            MAX_NAME,
        );
        if information.description.is_empty() {
            errors.push(ValidationError::new(
                format!("informations.{position}.description"),
                ValidationCode::Required,
            ));
        }
    }

    errors
}

fn check_text(errors: &mut Vec<ValidationError>, field: &str, value: &str, max: usize) {
    if value.is_empty() {
        errors.push(ValidationError::new(field, ValidationCode::Required));
    } else if value.chars().count() > max {
        errors.push(ValidationError::new(field, ValidationCode::MaxLength(max)));
    }
}
