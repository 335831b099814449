//! Validation error kinds and the per-kind error map.
//!
//! The form tracks at most one current message per error kind, so
//! re-validating a field on every keystroke replaces its message
//! instead of appending a duplicate, and fixing the field clears it
//! without disturbing errors on other fields.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Discriminator identifying which input failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// The percentage field is not an integer in `[1, 100]`.
    PercentageRange,
    /// `submit` was attempted with no file selected.
    MissingFile,
    /// `submit` was attempted with no valid percentage stored.
    MissingPercentage,
}

impl ValidationErrorKind {
    /// The message recorded when this kind is raised.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::PercentageRange => "Percentage must be a number from 1 to 100",
            Self::MissingFile => "Choose an image file first",
            Self::MissingPercentage => "Enter a pixelation percentage first",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Current validation errors, keyed by kind.
///
/// Raising a kind that is already present replaces its message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors(BTreeMap<ValidationErrorKind, String>);

impl ValidationErrors {
    /// Create an empty error map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record a kind with its standard message, replacing any prior
    /// message for the same kind.
    pub fn raise(&mut self, kind: ValidationErrorKind) {
        self.0.insert(kind, kind.message().to_string());
    }

    /// Clear the error for one kind, if present.
    pub fn clear(&mut self, kind: ValidationErrorKind) {
        self.0.remove(&kind);
    }

    /// Drop all recorded errors.
    pub fn clear_all(&mut self) {
        self.0.clear();
    }

    /// Whether an error of the given kind is currently recorded.
    #[must_use]
    pub fn contains(&self, kind: ValidationErrorKind) -> bool {
        self.0.contains_key(&kind)
    }

    /// The current message for a kind, if recorded.
    #[must_use]
    pub fn message(&self, kind: ValidationErrorKind) -> Option<&str> {
        self.0.get(&kind).map(String::as_str)
    }

    /// Whether no errors are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct kinds currently recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(kind, message)` pairs in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (ValidationErrorKind, &str)> {
        self.0.iter().map(|(kind, message)| (*kind, message.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_twice_does_not_duplicate() {
        let mut errors = ValidationErrors::new();
        errors.raise(ValidationErrorKind::PercentageRange);
        errors.raise(ValidationErrorKind::PercentageRange);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.message(ValidationErrorKind::PercentageRange),
            Some("Percentage must be a number from 1 to 100"),
        );
    }

    #[test]
    fn clear_removes_only_the_given_kind() {
        let mut errors = ValidationErrors::new();
        errors.raise(ValidationErrorKind::PercentageRange);
        errors.raise(ValidationErrorKind::MissingFile);
        errors.clear(ValidationErrorKind::PercentageRange);
        assert!(!errors.contains(ValidationErrorKind::PercentageRange));
        assert!(errors.contains(ValidationErrorKind::MissingFile));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn clear_absent_kind_is_a_no_op() {
        let mut errors = ValidationErrors::new();
        errors.clear(ValidationErrorKind::MissingFile);
        assert!(errors.is_empty());
    }

    #[test]
    fn iter_yields_kind_order() {
        let mut errors = ValidationErrors::new();
        errors.raise(ValidationErrorKind::MissingPercentage);
        errors.raise(ValidationErrorKind::PercentageRange);
        let kinds: Vec<_> = errors.iter().map(|(kind, _)| kind).collect();
        assert_eq!(
            kinds,
            vec![
                ValidationErrorKind::PercentageRange,
                ValidationErrorKind::MissingPercentage,
            ],
        );
    }
}
