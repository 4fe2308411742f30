//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Reads classify shows against a caller-supplied `now`
//! - Mutations open one transaction, validate references inside it, and
//!   only then write; dropping the transaction on an early return rolls
//!   it back

pub mod artists;
pub mod genres;
pub mod shows;
pub mod venues;

pub use artists::{Artist, ArtistDetail, ArtistMatch, ArtistRepo, ArtistSummary, VenueAppearance};
pub use genres::{Genre, GenreRepo};
pub use shows::{Show, ShowListing, ShowRepo};
pub use venues::{ArtistAppearance, Venue, VenueArea, VenueChoice, VenueDetail, VenueRepo, VenueSummary};

use serde::Serialize;

use crate::models::ValidationError;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("conflict: {resource} '{id}' {reason}")]
    Conflict {
        resource: &'static str,
        id: String,
        reason: String,
    },

    #[error("integrity violation: show {show_id} references missing {resource} {id}")]
    Integrity {
        show_id: i64,
        resource: &'static str,
        id: i64,
    },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

/// Name search results
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults<T> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for SearchResults<T> {
    fn from(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}
