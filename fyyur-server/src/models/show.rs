//! Show form validation and past/upcoming classification
//!
//! Start times are kept in UTC at whole-second precision. Stored values and
//! the `now` they are compared against share that precision, so the text
//! comparison done by the store orders them correctly.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde::Serialize;

use super::ValidationError;

/// Naive formats accepted for `start_time`, interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Raw show submission.
#[derive(Debug, Clone, Default)]
pub struct ShowDraft {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

/// Show with parsed references and start time. The ids are not yet known
/// to exist; the store checks them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShow {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

impl ShowDraft {
    pub fn validate(self) -> Result<NewShow, ValidationError> {
        Ok(NewShow {
            artist_id: parse_id("artist_id", &self.artist_id)?,
            venue_id: parse_id("venue_id", &self.venue_id)?,
            start_time: parse_start_time(&self.start_time)?,
        })
    }
}

/// Whether a show has already started relative to some instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowTiming {
    Past,
    Upcoming,
}

impl ShowTiming {
    /// A show starting exactly at `now` is upcoming.
    pub fn classify(start_time: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if start_time < now {
            Self::Past
        } else {
            Self::Upcoming
        }
    }
}

/// Current time at the precision start times are stored with.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Parse a positive record id.
pub fn parse_id(field: &'static str, s: &str) -> Result<i64, ValidationError> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    match trimmed.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidFormat {
            field,
            reason: "must be a positive integer id",
        }),
    }
}

/// Parse a submitted start time.
///
/// Accepts RFC 3339 (any offset, converted to UTC) or a naive
/// `YYYY-MM-DD HH:MM[:SS]` with either a space or `T` separator.
pub fn parse_start_time(s: &str) -> Result<DateTime<Utc>, ValidationError> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field: "start_time" });
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc).trunc_subsecs(0));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| naive.and_utc().trunc_subsecs(0))
        .ok_or(ValidationError::InvalidFormat {
            field: "start_time",
            reason: "expected YYYY-MM-DD HH:MM:SS or an RFC 3339 timestamp",
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn parses_naive_formats_as_utc() {
        let expected = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();
        assert_eq!(parse_start_time("2035-04-01 20:00:00").unwrap(), expected);
        assert_eq!(parse_start_time("2035-04-01 20:00").unwrap(), expected);
        assert_eq!(parse_start_time("2035-04-01T20:00").unwrap(), expected);
    }

    #[test]
    fn rfc3339_is_converted_to_utc() {
        let parsed = parse_start_time("2035-04-01T22:00:00.750+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap());
    }

    #[test]
    fn rejects_garbage_time() {
        let err = parse_start_time("next tuesday").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { field: "start_time", .. }));
        assert_eq!(
            parse_start_time("").unwrap_err(),
            ValidationError::Empty { field: "start_time" }
        );
    }

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!(parse_id("venue_id", " 7 ").unwrap(), 7);
        assert!(parse_id("venue_id", "0").is_err());
        assert!(parse_id("venue_id", "-3").is_err());
        assert!(parse_id("venue_id", "abc").is_err());
    }

    #[test]
    fn draft_reports_first_bad_field() {
        let draft = ShowDraft {
            artist_id: "1".into(),
            venue_id: "x".into(),
            start_time: "2035-04-01 20:00:00".into(),
        };
        assert_eq!(draft.validate().unwrap_err().field(), "venue_id");
    }

    #[test]
    fn boundary_counts_as_upcoming() {
        let now = now();
        assert_eq!(ShowTiming::classify(now, now), ShowTiming::Upcoming);
        assert_eq!(
            ShowTiming::classify(now - Duration::seconds(1), now),
            ShowTiming::Past
        );
        assert_eq!(
            ShowTiming::classify(now + Duration::days(3), now),
            ShowTiming::Upcoming
        );
    }
}
