//! Validation error types

use std::fmt;

/// Validation error for submitted forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is missing or blank
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Field doesn't match the required format
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Submitted genre name has no matching genre row
    UnknownGenre { name: String },

    /// Submitted id doesn't resolve to an existing record
    UnknownReference { field: &'static str, id: i64 },
}

impl ValidationError {
    /// Name of the offending form field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field }
            | Self::TooLong { field, .. }
            | Self::InvalidFormat { field, .. }
            | Self::UnknownReference { field, .. } => field,
            Self::UnknownGenre { .. } => "genres",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::UnknownGenre { name } => write!(f, "unknown genre: '{}'", name),
            Self::UnknownReference { field, id } => {
                write!(f, "{}: no record with id {}", field, id)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "city",
            max: 120,
        };
        assert_eq!(err.to_string(), "city exceeds maximum length of 120 characters");

        let err = ValidationError::UnknownReference {
            field: "artist_id",
            id: 42,
        };
        assert_eq!(err.to_string(), "artist_id: no record with id 42");
    }

    #[test]
    fn unknown_genre_points_at_genres_field() {
        let err = ValidationError::UnknownGenre { name: "Polka".into() };
        assert_eq!(err.field(), "genres");
        assert_eq!(err.to_string(), "unknown genre: 'Polka'");
    }
}
