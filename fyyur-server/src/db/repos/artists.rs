//! Artist repository
//!
//! Mirrors the venue repository: paginated listing, name search, detail
//! with past/upcoming shows, and transactional create/update/delete.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, Row, SqlitePool};

use super::genres::{self, GenreOwner};
use super::{DbError, SearchResults};
use crate::models::search::fold;
use crate::models::{ArtistFields, Paginated, Pagination, SearchTerm, ShowTiming};

const ARTIST_COLUMNS: &str = "id, name, city, state, phone, image_link, facebook_link, \
                              website, seeking_venue, seeking_description";

/// Artist record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Artist list entry
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ArtistSummary {
    pub id: i64,
    pub name: String,
}

/// Artist search hit with its upcoming show count
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ArtistMatch {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// A show by this artist, seen from the artist's page
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct VenueAppearance {
    pub show_id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Artist page data
#[derive(Debug, Clone, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub genres: Vec<String>,
    pub past_shows: Vec<VenueAppearance>,
    pub upcoming_shows: Vec<VenueAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Artist repository
pub struct ArtistRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ArtistRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List artists by id with pagination.
    ///
    /// Uses window function for total count in single query.
    pub async fn list(&self, page: Pagination) -> Result<Paginated<ArtistSummary>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, COUNT(*) OVER() AS total
            FROM artists
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        let total = match rows.first() {
            Some(row) => row.try_get::<i64, _>("total")?,
            None => self.count().await?,
        };
        let items = rows
            .iter()
            .map(ArtistSummary::from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(page.wrap(items, total))
    }

    /// Every artist by name, for the show form's artist picker.
    pub async fn choices(&self) -> Result<Vec<ArtistSummary>, DbError> {
        let artists =
            sqlx::query_as::<_, ArtistSummary>("SELECT id, name FROM artists ORDER BY name, id")
                .fetch_all(self.pool)
                .await?;
        Ok(artists)
    }

    async fn count(&self) -> Result<i64, DbError> {
        let total = sqlx::query_scalar("SELECT COUNT(*) FROM artists")
            .fetch_one(self.pool)
            .await?;
        Ok(total)
    }

    /// Artists whose name contains `term`, case-insensitively, with their
    /// upcoming show counts.
    pub async fn search(
        &self,
        term: &SearchTerm,
        now: DateTime<Utc>,
    ) -> Result<SearchResults<ArtistMatch>, DbError> {
        let artists = sqlx::query_as::<_, ArtistMatch>(
            r#"
            SELECT
                a.id,
                a.name,
                COUNT(s.id) AS num_upcoming_shows
            FROM artists a
            LEFT JOIN shows s ON s.artist_id = a.id AND s.start_time >= ?
            WHERE a.name_folded LIKE ? ESCAPE '\'
            GROUP BY a.id, a.name
            ORDER BY a.id
            "#,
        )
        .bind(now)
        .bind(term.like_pattern())
        .fetch_all(self.pool)
        .await?;

        Ok(SearchResults::from(artists))
    }

    /// Get a single artist by id.
    pub async fn get(&self, id: i64) -> Result<Artist, DbError> {
        let sql = format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE id = ?");
        sqlx::query_as::<_, Artist>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("artist", id))
    }

    /// Genre names linked to an artist, ordered by name.
    pub async fn genres(&self, id: i64) -> Result<Vec<String>, DbError> {
        genres::names_for(self.pool, GenreOwner::Artist, id).await
    }

    /// Artist with genres and shows split around `now`.
    pub async fn detail(&self, id: i64, now: DateTime<Utc>) -> Result<ArtistDetail, DbError> {
        let artist = self.get(id).await?;
        let genres = self.genres(id).await?;

        let shows = sqlx::query_as::<_, VenueAppearance>(
            r#"
            SELECT
                s.id AS show_id,
                s.venue_id,
                v.name AS venue_name,
                v.image_link AS venue_image_link,
                s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            WHERE s.artist_id = ?
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        let (past_shows, upcoming_shows): (Vec<_>, Vec<_>) = shows
            .into_iter()
            .partition(|show| ShowTiming::classify(show.start_time, now) == ShowTiming::Past);

        Ok(ArtistDetail {
            artist,
            genres,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        })
    }

    /// Create an artist and its genre associations.
    pub async fn create(&self, fields: &ArtistFields) -> Result<Artist, DbError> {
        let mut tx = self.pool.begin().await?;

        let genre_ids = genres::resolve(&mut tx, &fields.genres).await?;

        let sql = format!(
            r#"
            INSERT INTO artists (name, name_folded, city, state, phone, image_link,
                                 facebook_link, website, seeking_venue, seeking_description)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {ARTIST_COLUMNS}
            "#
        );
        let artist = sqlx::query_as::<_, Artist>(&sql)
            .bind(&fields.name)
            .bind(fold(&fields.name))
            .bind(&fields.city)
            .bind(&fields.state)
            .bind(&fields.phone)
            .bind(&fields.image_link)
            .bind(&fields.facebook_link)
            .bind(&fields.website)
            .bind(fields.seeking_venue)
            .bind(&fields.seeking_description)
            .fetch_one(&mut *tx)
            .await?;

        genres::replace(&mut tx, GenreOwner::Artist, artist.id, &genre_ids).await?;

        tx.commit().await?;
        tracing::info!(artist_id = artist.id, name = %artist.name, "artist created");
        Ok(artist)
    }

    /// Overwrite an artist's fields and replace its whole genre set.
    pub async fn update(&self, id: i64, fields: &ArtistFields) -> Result<Artist, DbError> {
        let mut tx = self.pool.begin().await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM artists WHERE id = ?)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Err(DbError::not_found("artist", id));
        }

        let genre_ids = genres::resolve(&mut tx, &fields.genres).await?;

        let sql = format!(
            r#"
            UPDATE artists
            SET name = ?, name_folded = ?, city = ?, state = ?, phone = ?, image_link = ?, facebook_link = ?,
                website = ?, seeking_venue = ?, seeking_description = ?
            WHERE id = ?
            RETURNING {ARTIST_COLUMNS}
            "#
        );
        let artist = sqlx::query_as::<_, Artist>(&sql)
            .bind(&fields.name)
            .bind(fold(&fields.name))
            .bind(&fields.city)
            .bind(&fields.state)
            .bind(&fields.phone)
            .bind(&fields.image_link)
            .bind(&fields.facebook_link)
            .bind(&fields.website)
            .bind(fields.seeking_venue)
            .bind(&fields.seeking_description)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        genres::replace(&mut tx, GenreOwner::Artist, id, &genre_ids).await?;

        tx.commit().await?;
        tracing::info!(artist_id = id, "artist updated");
        Ok(artist)
    }

    /// Delete an artist with no shows.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM artists WHERE id = ?)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Err(DbError::not_found("artist", id));
        }

        let shows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows WHERE artist_id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if shows > 0 {
            return Err(DbError::Conflict {
                resource: "artist",
                id: id.to_string(),
                reason: format!("still has {} scheduled show(s)", shows),
            });
        }

        sqlx::query("DELETE FROM artists WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(artist_id = id, "artist deleted");
        Ok(())
    }
}
