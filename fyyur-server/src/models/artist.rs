//! Artist form validation

use serde::Serialize;

use super::fields::{
    genre_names, optional_link, optional_phone, optional_text, required_text, MAX_IMAGE_LINK_LEN,
    MAX_NAME_LEN, MAX_TEXT_LEN,
};
use super::ValidationError;

/// Raw artist submission, as read from the form.
#[derive(Debug, Clone, Default)]
pub struct ArtistDraft {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub genres: Vec<String>,
}

/// Validated artist fields, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub genres: Vec<String>,
}

impl ArtistDraft {
    pub fn validate(self) -> Result<ArtistFields, ValidationError> {
        Ok(ArtistFields {
            name: required_text("name", &self.name, MAX_NAME_LEN)?,
            city: required_text("city", &self.city, MAX_TEXT_LEN)?,
            state: required_text("state", &self.state, MAX_TEXT_LEN)?,
            phone: optional_phone(self.phone.as_deref())?,
            image_link: optional_link("image_link", self.image_link.as_deref(), MAX_IMAGE_LINK_LEN)?,
            facebook_link: optional_link(
                "facebook_link",
                self.facebook_link.as_deref(),
                MAX_TEXT_LEN,
            )?,
            website: optional_link("website", self.website.as_deref(), MAX_TEXT_LEN)?,
            seeking_venue: self.seeking_venue,
            seeking_description: optional_text(
                "seeking_description",
                self.seeking_description.as_deref(),
                MAX_TEXT_LEN,
            )?,
            genres: genre_names(self.genres.iter().map(String::as_str)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required() {
        let draft = ArtistDraft {
            city: "San Francisco".into(),
            state: "CA".into(),
            ..Default::default()
        };
        assert_eq!(draft.validate().unwrap_err(), ValidationError::Empty { field: "name" });
    }

    #[test]
    fn blank_optionals_become_none() {
        let draft = ArtistDraft {
            name: "Guns N Petals".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: Some(String::new()),
            facebook_link: Some("   ".into()),
            ..Default::default()
        };
        let fields = draft.validate().unwrap();
        assert_eq!(fields.phone, None);
        assert_eq!(fields.facebook_link, None);
        assert!(fields.genres.is_empty());
    }
}
