//! Show repository
//!
//! Shows have no update or delete path. The listing joins each show to its
//! venue and artist and refuses to paper over a missing row.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, Row, SqlitePool};

use super::DbError;
use crate::models::{NewShow, Paginated, Pagination, ValidationError};

/// Show record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Show {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub artist_id: i64,
    pub venue_id: i64,
}

/// Upcoming show with the names needed to display it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub show_id: i64,
    pub start_time: DateTime<Utc>,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
}

#[derive(FromRow)]
struct ListingRow {
    show_id: i64,
    start_time: DateTime<Utc>,
    venue_id: i64,
    venue_name: Option<String>,
    artist_id: i64,
    artist_name: Option<String>,
    artist_image_link: Option<String>,
}

impl TryFrom<ListingRow> for ShowListing {
    type Error = DbError;

    fn try_from(row: ListingRow) -> Result<Self, Self::Error> {
        let venue_name = row.venue_name.ok_or(DbError::Integrity {
            show_id: row.show_id,
            resource: "venue",
            id: row.venue_id,
        })?;
        let artist_name = row.artist_name.ok_or(DbError::Integrity {
            show_id: row.show_id,
            resource: "artist",
            id: row.artist_id,
        })?;

        Ok(Self {
            show_id: row.show_id,
            start_time: row.start_time,
            venue_id: row.venue_id,
            venue_name,
            artist_id: row.artist_id,
            artist_name,
            artist_image_link: row.artist_image_link,
        })
    }
}

/// Show repository
pub struct ShowRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ShowRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Shows starting at or after `now`, earliest first.
    ///
    /// LEFT JOINs so an orphaned show surfaces as `DbError::Integrity`
    /// instead of silently dropping out of the list.
    pub async fn list_upcoming(
        &self,
        now: DateTime<Utc>,
        page: Pagination,
    ) -> Result<Paginated<ShowListing>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                s.id AS show_id,
                s.start_time,
                s.venue_id,
                v.name AS venue_name,
                s.artist_id,
                a.name AS artist_name,
                a.image_link AS artist_image_link,
                COUNT(*) OVER() AS total
            FROM shows s
            LEFT JOIN venues v ON v.id = s.venue_id
            LEFT JOIN artists a ON a.id = s.artist_id
            WHERE s.start_time >= ?
            ORDER BY s.start_time, s.id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(now)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        let total = match rows.first() {
            Some(row) => row.try_get::<i64, _>("total")?,
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM shows WHERE start_time >= ?")
                    .bind(now)
                    .fetch_one(self.pool)
                    .await?
            }
        };

        let items = rows
            .iter()
            .map(|row| ListingRow::from_row(row).map_err(DbError::from).and_then(ShowListing::try_from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(page.wrap(items, total))
    }

    /// Schedule a show.
    ///
    /// Both references are checked inside the transaction; an unknown id is
    /// a validation failure naming the offending field, and nothing is
    /// written.
    pub async fn create(&self, show: &NewShow) -> Result<Show, DbError> {
        let mut tx = self.pool.begin().await?;

        let artist_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM artists WHERE id = ?)")
                .bind(show.artist_id)
                .fetch_one(&mut *tx)
                .await?;
        if !artist_exists {
            return Err(ValidationError::UnknownReference {
                field: "artist_id",
                id: show.artist_id,
            }
            .into());
        }

        let venue_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM venues WHERE id = ?)")
                .bind(show.venue_id)
                .fetch_one(&mut *tx)
                .await?;
        if !venue_exists {
            return Err(ValidationError::UnknownReference {
                field: "venue_id",
                id: show.venue_id,
            }
            .into());
        }

        let created = sqlx::query_as::<_, Show>(
            r#"
            INSERT INTO shows (start_time, artist_id, venue_id)
            VALUES (?, ?, ?)
            RETURNING id, start_time, artist_id, venue_id
            "#,
        )
        .bind(show.start_time)
        .bind(show.artist_id)
        .bind(show.venue_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(
            show_id = created.id,
            artist_id = created.artist_id,
            venue_id = created.venue_id,
            "show created"
        );
        Ok(created)
    }
}
