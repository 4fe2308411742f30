//! Form field names to drafts

use super::extractors::FormFields;
use crate::models::fields::parse_flag;
use crate::models::{ArtistDraft, SearchTerm, ShowDraft, VenueDraft};

impl From<&FormFields> for VenueDraft {
    fn from(form: &FormFields) -> Self {
        Self {
            name: form.text("name"),
            city: form.text("city"),
            state: form.text("state"),
            address: form.text("address"),
            phone: form.optional("phone"),
            image_link: form.optional("image_link"),
            facebook_link: form.optional("facebook_link"),
            website: form.optional("website"),
            seeking_talent: parse_flag(form.get("seeking_talent")),
            seeking_description: form.optional("seeking_description"),
            genres: form.all("genres"),
        }
    }
}

impl From<&FormFields> for ArtistDraft {
    fn from(form: &FormFields) -> Self {
        Self {
            name: form.text("name"),
            city: form.text("city"),
            state: form.text("state"),
            phone: form.optional("phone"),
            image_link: form.optional("image_link"),
            facebook_link: form.optional("facebook_link"),
            website: form.optional("website"),
            seeking_venue: parse_flag(form.get("seeking_venue")),
            seeking_description: form.optional("seeking_description"),
            genres: form.all("genres"),
        }
    }
}

impl From<&FormFields> for ShowDraft {
    fn from(form: &FormFields) -> Self {
        Self {
            artist_id: form.text("artist_id"),
            venue_id: form.text("venue_id"),
            start_time: form.text("start_time"),
        }
    }
}

impl From<&FormFields> for SearchTerm {
    fn from(form: &FormFields) -> Self {
        SearchTerm::new(form.get("search_term").unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        FormFields::new(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        )
    }

    #[test]
    fn venue_form_maps_flags_and_genres() {
        let form = fields(&[
            ("name", "Park Square Live Music & Coffee"),
            ("seeking_talent", "y"),
            ("genres", "Rock n Roll"),
            ("genres", "Jazz"),
        ]);
        let draft = VenueDraft::from(&form);
        assert!(draft.seeking_talent);
        assert_eq!(draft.genres, vec!["Rock n Roll", "Jazz"]);
        assert_eq!(draft.city, "");
    }

    #[test]
    fn unchecked_box_is_false() {
        let draft = ArtistDraft::from(&fields(&[("name", "Matt Quevedo")]));
        assert!(!draft.seeking_venue);
    }

    #[test]
    fn missing_search_term_matches_all() {
        let term = SearchTerm::from(&fields(&[]));
        assert_eq!(term.like_pattern(), "%%");
    }
}
