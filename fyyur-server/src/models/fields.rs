//! Field-level checks shared by the venue and artist forms.
//!
//! Text is trimmed before any check. Optional fields that are blank after
//! trimming become `None` so the store never holds empty strings.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum length for venue and artist names
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length for ordinary text columns (city, state, address, ...)
pub const MAX_TEXT_LEN: usize = 120;

/// Maximum length for image links
pub const MAX_IMAGE_LINK_LEN: usize = 500;

/// http(s) scheme followed by at least one non-space character
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://\S+$").expect("invalid link regex"));

/// Digits with optional leading `+` and common separators
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9(][0-9 ().-]{4,30}[0-9]$").expect("invalid phone regex")
});

/// Trimmed, non-empty text no longer than `max`.
pub fn required_text(field: &'static str, s: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    check_len(field, trimmed, max)?;
    Ok(trimmed.to_owned())
}

/// Trimmed text no longer than `max`; blank input yields `None`.
pub fn optional_text(
    field: &'static str,
    s: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match s.map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => {
            check_len(field, trimmed, max)?;
            Ok(Some(trimmed.to_owned()))
        }
    }
}

/// Optional http(s) link.
pub fn optional_link(
    field: &'static str,
    s: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    let link = optional_text(field, s, max)?;

    if let Some(ref value) = link {
        if !LINK_RE.is_match(value) {
            return Err(ValidationError::InvalidFormat {
                field,
                reason: "must be an http:// or https:// link",
            });
        }
    }

    Ok(link)
}

/// Optional phone number.
pub fn optional_phone(s: Option<&str>) -> Result<Option<String>, ValidationError> {
    let phone = optional_text("phone", s, MAX_TEXT_LEN)?;

    if let Some(ref value) = phone {
        if !PHONE_RE.is_match(value) {
            return Err(ValidationError::InvalidFormat {
                field: "phone",
                reason: "must contain digits with optional +, spaces, dashes, dots or parentheses",
            });
        }
    }

    Ok(phone)
}

/// Checkbox semantics: `y`, `true`, `on` and `1` are set, anything else is not.
pub fn parse_flag(s: Option<&str>) -> bool {
    matches!(
        s.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("y" | "true" | "on" | "1")
    )
}

/// Trim, drop blanks and de-duplicate genre names case-insensitively,
/// keeping first-seen order.
pub fn genre_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();

    for name in names.into_iter().map(str::trim).filter(|n| !n.is_empty()) {
        if !seen.iter().any(|s| s.eq_ignore_ascii_case(name)) {
            seen.push(name.to_owned());
        }
    }

    seen
}

fn check_len(field: &'static str, s: &str, max: usize) -> Result<(), ValidationError> {
    if s.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims() {
        assert_eq!(required_text("city", "  Austin ", 120).unwrap(), "Austin");
    }

    #[test]
    fn required_text_rejects_blank() {
        assert_eq!(
            required_text("city", "   ", 120).unwrap_err(),
            ValidationError::Empty { field: "city" }
        );
    }

    #[test]
    fn max_length_counts_chars() {
        let ok = "é".repeat(120);
        assert!(required_text("city", &ok, 120).is_ok());

        let too_long = "é".repeat(121);
        assert!(matches!(
            required_text("city", &too_long, 120).unwrap_err(),
            ValidationError::TooLong { max: 120, .. }
        ));
    }

    #[test]
    fn optional_text_blank_is_none() {
        assert_eq!(optional_text("website", None, 120).unwrap(), None);
        assert_eq!(optional_text("website", Some("  "), 120).unwrap(), None);
    }

    #[test]
    fn links_need_http_scheme() {
        assert!(optional_link("website", Some("https://themusicalhop.com"), 120).is_ok());
        assert!(optional_link("website", Some("http://example.org/a?b=c"), 120).is_ok());

        let err = optional_link("website", Some("themusicalhop.com"), 120).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { field: "website", .. }));

        let err = optional_link("website", Some("https://has space.com"), 120).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn phone_formats() {
        assert!(optional_phone(Some("123-123-1234")).is_ok());
        assert!(optional_phone(Some("+1 (415) 000-1234")).is_ok());
        assert!(optional_phone(Some("326.123.5000")).is_ok());
        assert!(optional_phone(Some("call me")).is_err());
        assert!(optional_phone(Some("12")).is_err());
    }

    #[test]
    fn flags() {
        assert!(parse_flag(Some("y")));
        assert!(parse_flag(Some("True")));
        assert!(parse_flag(Some("on")));
        assert!(!parse_flag(Some("n")));
        assert!(!parse_flag(Some("yes")));
        assert!(!parse_flag(Some("")));
        assert!(!parse_flag(None));
    }

    #[test]
    fn genre_names_dedup_case_insensitive() {
        let names = genre_names(["Jazz", " jazz ", "", "Rock n Roll", "JAZZ"]);
        assert_eq!(names, vec!["Jazz".to_owned(), "Rock n Roll".to_owned()]);
    }
}
