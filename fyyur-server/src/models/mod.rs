//! Domain models with validation at construction
//!
//! Submitted forms arrive as drafts of raw strings and become validated
//! field sets before anything touches the store. Invalid input returns
//! `ValidationError`, never a panic.

pub mod artist;
pub mod fields;
pub mod pagination;
pub mod search;
pub mod show;
pub mod validation;
pub mod venue;

pub use artist::{ArtistDraft, ArtistFields};
pub use pagination::{Paginated, Pagination, PaginationParams};
pub use search::SearchTerm;
pub use show::{NewShow, ShowDraft, ShowTiming};
pub use validation::ValidationError;
pub use venue::{VenueDraft, VenueFields};
