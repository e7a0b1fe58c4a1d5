//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types and configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A configured duration was outside its accepted range.
    #[error("{field} must be between {min} and {max} minutes, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// A validated person identifier.
///
/// Person IDs are non-empty after trimming surrounding whitespace. They are
/// usually the concatenated first and last name from the badge log, and are
/// ordered lexically so reports iterate people deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonId(String);

impl PersonId {
    /// Creates a new ID after trimming and validation.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "person ID" });
        }
        if trimmed.len() == id.len() {
            Ok(Self(id))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PersonId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PersonId> for String {
    fn from(id: PersonId) -> Self {
        id.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PersonId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_id_rejects_empty() {
        assert!(PersonId::new("").is_err());
        assert!(PersonId::new("   ").is_err());
        assert!(PersonId::new("Anna Nowak").is_ok());
    }

    #[test]
    fn person_id_trims_whitespace() {
        let id = PersonId::new("  Anna Nowak ").unwrap();
        assert_eq!(id.as_str(), "Anna Nowak");
    }

    #[test]
    fn person_id_orders_lexically() {
        let a = PersonId::new("Adam Kowalski").unwrap();
        let b = PersonId::new("Beata Zielińska").unwrap();
        assert!(a < b);
    }

    #[test]
    fn person_id_serde_roundtrip() {
        let id = PersonId::new("Anna Nowak").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"Anna Nowak\"");
        let parsed: PersonId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn person_id_serde_rejects_empty() {
        let result: Result<PersonId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn validation_error_messages() {
        let err = ValidationError::OutOfRange {
            field: "early_exit_window_minutes",
            value: 90,
            min: 1,
            max: 60,
        };
        assert_eq!(
            err.to_string(),
            "early_exit_window_minutes must be between 1 and 60 minutes, got 90"
        );
    }
}
