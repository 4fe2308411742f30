//! Route handlers organized by resource

pub mod artists;
pub mod genres;
pub mod health;
pub mod shows;
pub mod venues;

use serde::Serialize;

/// Body returned by a successful create, update, or delete
#[derive(Debug, Serialize)]
pub struct Outcome {
    pub id: i64,
    pub message: String,
}

impl Outcome {
    pub fn new(id: i64, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
        }
    }
}
