//! Form validation primitives.
//!
//! Validation produces typed `(field, code)` pairs and leaves message
//! rendering to a [`MessageProvider`], so the checking logic carries no
//! dependency on process-wide locale state. Callers pick a catalog per
//! surface; [`EnglishMessages`] is the default.

/// What went wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationCode {
    /// A required field is empty or unset.
    Required,
    /// A text field exceeds its maximum length.
    MaxLength(usize),
    /// A shorter input than allowed (passwords).
    MinLength(usize),
    /// A numeric field is below zero.
    NonNegative,
    /// An attribute needs at least one option value.
    AtLeastOneValue,
    /// Multi-variant products need at least one non-deleted variant.
    AtLeastOneVariant,
    /// Not a well-formed email address.
    InvalidEmail,
    /// Password and confirmation differ.
    PasswordMismatch,
}

/// One failed constraint, anchored to a form field path (e.g.
/// `variants.2.name`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub code: ValidationCode,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, code: ValidationCode) -> Self {
        Self {
            field: field.into(),
            code,
        }
    }
}

/// Renders validation errors into user-facing text.
pub trait MessageProvider {
    /// A display message for one error.
    fn render(&self, error: &ValidationError) -> String;
}

/// Default English message catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishMessages;

impl MessageProvider for EnglishMessages {
    fn render(&self, error: &ValidationError) -> String {
        match error.code {
            ValidationCode::Required => "This field is required".to_owned(),
            ValidationCode::MaxLength(max) => {
                format!("Must be at most {max} characters")
            }
            ValidationCode::MinLength(min) => {
                format!("Must be at least {min} characters")
            }
            ValidationCode::NonNegative => "Must be zero or more".to_owned(),
            ValidationCode::AtLeastOneValue => "At least one value is required".to_owned(),
            ValidationCode::AtLeastOneVariant => "At least one variant is required".to_owned(),
            ValidationCode::InvalidEmail => "Must be a valid email address".to_owned(),
            ValidationCode::PasswordMismatch => "Passwords do not match".to_owned(),
        }
    }
}
