//! Venue repository
//!
//! Reads:
//! - list_by_area: venues grouped by (city, state) with upcoming show counts
//! - search: case-insensitive name match
//! - detail: record, genres, past and upcoming shows
//!
//! Writes run in one transaction each. Deleting a venue is rejected while
//! any show references it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::genres::{self, GenreOwner};
use super::{DbError, SearchResults};
use crate::models::search::fold;
use crate::models::{SearchTerm, ShowTiming, VenueFields};

const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, image_link, \
                             facebook_link, website, seeking_talent, seeking_description";

/// Venue record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Venue {
    pub id: i64,
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
}

/// Venue with its upcoming show count, for lists and search results
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Venue id and name, for pickers
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct VenueChoice {
    pub id: i64,
    pub name: String,
}

/// Venues sharing one (city, state)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// A show at this venue, seen from the venue's page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistAppearance {
    pub show_id: i64,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Venue page data
#[derive(Debug, Clone, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub genres: Vec<String>,
    pub past_shows: Vec<ArtistAppearance>,
    pub upcoming_shows: Vec<ArtistAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(FromRow)]
struct AreaRow {
    id: i64,
    name: String,
    city: String,
    state: String,
    num_upcoming_shows: i64,
}

#[derive(FromRow)]
struct AppearanceRow {
    show_id: i64,
    artist_id: i64,
    artist_name: String,
    artist_image_link: Option<String>,
    start_time: DateTime<Utc>,
}

/// Venue repository
pub struct VenueRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> VenueRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All venues grouped by (city, state).
    ///
    /// Single query: LEFT JOIN on upcoming shows for the counts, ordered so
    /// each area's venues are contiguous.
    pub async fn list_by_area(&self, now: DateTime<Utc>) -> Result<Vec<VenueArea>, DbError> {
        let rows = sqlx::query_as::<_, AreaRow>(
            r#"
            SELECT
                v.id,
                v.name,
                v.city,
                v.state,
                COUNT(s.id) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id AND s.start_time >= ?
            GROUP BY v.id, v.name, v.city, v.state
            ORDER BY v.state, v.city, v.id
            "#,
        )
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        let mut areas: Vec<VenueArea> = Vec::new();
        for row in rows {
            let summary = VenueSummary {
                id: row.id,
                name: row.name,
                num_upcoming_shows: row.num_upcoming_shows,
            };

            match areas.last_mut() {
                Some(area) if area.city == row.city && area.state == row.state => {
                    area.venues.push(summary)
                }
                _ => areas.push(VenueArea {
                    city: row.city,
                    state: row.state,
                    venues: vec![summary],
                }),
            }
        }

        Ok(areas)
    }

    /// Every venue by name.
    pub async fn choices(&self) -> Result<Vec<VenueChoice>, DbError> {
        let venues =
            sqlx::query_as::<_, VenueChoice>("SELECT id, name FROM venues ORDER BY name, id")
                .fetch_all(self.pool)
                .await?;
        Ok(venues)
    }

    /// Venues whose name contains `term`, case-insensitively.
    pub async fn search(
        &self,
        term: &SearchTerm,
        now: DateTime<Utc>,
    ) -> Result<SearchResults<VenueSummary>, DbError> {
        let venues = sqlx::query_as::<_, VenueSummary>(
            r#"
            SELECT
                v.id,
                v.name,
                COUNT(s.id) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id AND s.start_time >= ?
            WHERE v.name_folded LIKE ? ESCAPE '\'
            GROUP BY v.id, v.name
            ORDER BY v.id
            "#,
        )
        .bind(now)
        .bind(term.like_pattern())
        .fetch_all(self.pool)
        .await?;

        Ok(SearchResults::from(venues))
    }

    /// Get a single venue by id.
    pub async fn get(&self, id: i64) -> Result<Venue, DbError> {
        let sql = format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = ?");
        sqlx::query_as::<_, Venue>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("venue", id))
    }

    /// Genre names linked to a venue, ordered by name.
    pub async fn genres(&self, id: i64) -> Result<Vec<String>, DbError> {
        genres::names_for(self.pool, GenreOwner::Venue, id).await
    }

    /// Venue with genres and its shows split into past and upcoming,
    /// each ordered by start time.
    pub async fn detail(&self, id: i64, now: DateTime<Utc>) -> Result<VenueDetail, DbError> {
        let venue = self.get(id).await?;
        let genres = self.genres(id).await?;

        let rows = sqlx::query_as::<_, AppearanceRow>(
            r#"
            SELECT
                s.id AS show_id,
                s.artist_id,
                a.name AS artist_name,
                a.image_link AS artist_image_link,
                s.start_time
            FROM shows s
            JOIN artists a ON a.id = s.artist_id
            WHERE s.venue_id = ?
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        let (past_shows, upcoming_shows): (Vec<_>, Vec<_>) = rows
            .into_iter()
            .map(|r| ArtistAppearance {
                show_id: r.show_id,
                artist_id: r.artist_id,
                artist_name: r.artist_name,
                artist_image_link: r.artist_image_link,
                start_time: r.start_time,
            })
            .partition(|show| ShowTiming::classify(show.start_time, now) == ShowTiming::Past);

        Ok(VenueDetail {
            venue,
            genres,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        })
    }

    /// Create a venue and its genre associations.
    pub async fn create(&self, fields: &VenueFields) -> Result<Venue, DbError> {
        let mut tx = self.pool.begin().await?;

        let genre_ids = genres::resolve(&mut tx, &fields.genres).await?;

        let sql = format!(
            r#"
            INSERT INTO venues (name, name_folded, city, state, address, phone, image_link,
                                facebook_link, website, seeking_talent, seeking_description)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {VENUE_COLUMNS}
            "#
        );
        let venue = sqlx::query_as::<_, Venue>(&sql)
            .bind(&fields.name)
            .bind(fold(&fields.name))
            .bind(&fields.city)
            .bind(&fields.state)
            .bind(&fields.address)
            .bind(&fields.phone)
            .bind(&fields.image_link)
            .bind(&fields.facebook_link)
            .bind(&fields.website)
            .bind(fields.seeking_talent)
            .bind(&fields.seeking_description)
            .fetch_one(&mut *tx)
            .await?;

        genres::replace(&mut tx, GenreOwner::Venue, venue.id, &genre_ids).await?;

        tx.commit().await?;
        tracing::info!(venue_id = venue.id, name = %venue.name, "venue created");
        Ok(venue)
    }

    /// Overwrite a venue's fields and replace its whole genre set.
    pub async fn update(&self, id: i64, fields: &VenueFields) -> Result<Venue, DbError> {
        let mut tx = self.pool.begin().await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM venues WHERE id = ?)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Err(DbError::not_found("venue", id));
        }

        let genre_ids = genres::resolve(&mut tx, &fields.genres).await?;

        let sql = format!(
            r#"
            UPDATE venues
            SET name = ?, name_folded = ?, city = ?, state = ?, address = ?, phone = ?, image_link = ?,
                facebook_link = ?, website = ?, seeking_talent = ?, seeking_description = ?
            WHERE id = ?
            RETURNING {VENUE_COLUMNS}
            "#
        );
        let venue = sqlx::query_as::<_, Venue>(&sql)
            .bind(&fields.name)
            .bind(fold(&fields.name))
            .bind(&fields.city)
            .bind(&fields.state)
            .bind(&fields.address)
            .bind(&fields.phone)
            .bind(&fields.image_link)
            .bind(&fields.facebook_link)
            .bind(&fields.website)
            .bind(fields.seeking_talent)
            .bind(&fields.seeking_description)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        genres::replace(&mut tx, GenreOwner::Venue, id, &genre_ids).await?;

        tx.commit().await?;
        tracing::info!(venue_id = id, "venue updated");
        Ok(venue)
    }

    /// Delete a venue with no shows. Its genre associations go with it.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM venues WHERE id = ?)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Err(DbError::not_found("venue", id));
        }

        let shows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows WHERE venue_id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if shows > 0 {
            return Err(DbError::Conflict {
                resource: "venue",
                id: id.to_string(),
                reason: format!("still has {} scheduled show(s)", shows),
            });
        }

        sqlx::query("DELETE FROM venues WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(venue_id = id, "venue deleted");
        Ok(())
    }
}
