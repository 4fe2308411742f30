//! Venue form validation

use serde::Serialize;

use super::fields::{
    genre_names, optional_link, optional_phone, optional_text, required_text, MAX_IMAGE_LINK_LEN,
    MAX_NAME_LEN, MAX_TEXT_LEN,
};
use super::ValidationError;

/// Raw venue submission, as read from the form.
#[derive(Debug, Clone, Default)]
pub struct VenueDraft {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub genres: Vec<String>,
}

/// Validated venue fields, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub genres: Vec<String>,
}

impl VenueDraft {
    /// Validate every field, failing on the first offending one.
    ///
    /// Genre names are only normalized here; whether they exist is
    /// decided by the store.
    pub fn validate(self) -> Result<VenueFields, ValidationError> {
        Ok(VenueFields {
            name: required_text("name", &self.name, MAX_NAME_LEN)?,
            city: required_text("city", &self.city, MAX_TEXT_LEN)?,
            state: required_text("state", &self.state, MAX_TEXT_LEN)?,
            address: required_text("address", &self.address, MAX_TEXT_LEN)?,
            phone: optional_phone(self.phone.as_deref())?,
            image_link: optional_link("image_link", self.image_link.as_deref(), MAX_IMAGE_LINK_LEN)?,
            facebook_link: optional_link(
                "facebook_link",
                self.facebook_link.as_deref(),
                MAX_TEXT_LEN,
            )?,
            website: optional_link("website", self.website.as_deref(), MAX_TEXT_LEN)?,
            seeking_talent: self.seeking_talent,
            seeking_description: optional_text(
                "seeking_description",
                self.seeking_description.as_deref(),
                MAX_TEXT_LEN,
            )?,
            genres: genre_names(self.genres.iter().map(String::as_str)),
        })
    }
}
