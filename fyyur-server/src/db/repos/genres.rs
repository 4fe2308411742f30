//! Genre repository and genre association helpers
//!
//! Genres are seeded reference data. Venues and artists link to them
//! through `venue_genres` / `artist_genres`; these helpers run on a
//! caller's connection so they join the caller's transaction.

use serde::Serialize;
use sqlx::{FromRow, SqliteConnection, SqlitePool};

use super::DbError;
use crate::models::ValidationError;

/// Genre record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Which join table an association lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GenreOwner {
    Venue,
    Artist,
}

impl GenreOwner {
    // Only these literals are ever formatted into SQL.
    fn table(self) -> &'static str {
        match self {
            Self::Venue => "venue_genres",
            Self::Artist => "artist_genres",
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Venue => "venue_id",
            Self::Artist => "artist_id",
        }
    }
}

/// Genre repository
pub struct GenreRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> GenreRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All genres, ordered by name.
    pub async fn list(&self) -> Result<Vec<Genre>, DbError> {
        let genres = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name")
            .fetch_all(self.pool)
            .await?;
        Ok(genres)
    }
}

/// Resolve genre names to ids (case-insensitive).
///
/// Fails with `ValidationError::UnknownGenre` for the first name that has
/// no row; nothing is created.
pub(crate) async fn resolve(
    conn: &mut SqliteConnection,
    names: &[String],
) -> Result<Vec<i64>, DbError> {
    let mut ids = Vec::with_capacity(names.len());

    for name in names {
        let id: Option<i64> = sqlx::query_scalar("SELECT id FROM genres WHERE name = ?")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;

        match id {
            Some(id) if !ids.contains(&id) => ids.push(id),
            Some(_) => {}
            None => return Err(ValidationError::UnknownGenre { name: name.clone() }.into()),
        }
    }

    Ok(ids)
}

/// Replace the owner's whole genre set with `genre_ids`.
pub(crate) async fn replace(
    conn: &mut SqliteConnection,
    owner: GenreOwner,
    owner_id: i64,
    genre_ids: &[i64],
) -> Result<(), DbError> {
    let delete = format!("DELETE FROM {} WHERE {} = ?", owner.table(), owner.column());
    sqlx::query(&delete)
        .bind(owner_id)
        .execute(&mut *conn)
        .await?;

    let insert = format!(
        "INSERT INTO {} ({}, genre_id) VALUES (?, ?)",
        owner.table(),
        owner.column()
    );
    for genre_id in genre_ids {
        sqlx::query(&insert)
            .bind(owner_id)
            .bind(genre_id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

/// Genre names linked to one owner, ordered by name.
pub(crate) async fn names_for(
    pool: &SqlitePool,
    owner: GenreOwner,
    owner_id: i64,
) -> Result<Vec<String>, DbError> {
    let sql = format!(
        r#"
        SELECT g.name
        FROM genres g
        JOIN {table} link ON link.genre_id = g.id
        WHERE link.{column} = ?
        ORDER BY g.name
        "#,
        table = owner.table(),
        column = owner.column()
    );

    let names = sqlx::query_scalar::<_, String>(&sql)
        .bind(owner_id)
        .fetch_all(pool)
        .await?;
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    #[tokio::test]
    async fn list_is_sorted() {
        let pool = create_memory_pool().await.unwrap();
        let genres = GenreRepo::new(&pool).list().await.unwrap();

        assert_eq!(genres.len(), 19);
        assert_eq!(genres[0].name, "Alternative");
        let mut names: Vec<_> = genres.iter().map(|g| g.name.clone()).collect();
        names.sort();
        assert_eq!(names, genres.iter().map(|g| g.name.clone()).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn resolve_is_case_insensitive_and_dedups() {
        let pool = create_memory_pool().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();

        let ids = resolve(&mut conn, &["jazz".into(), "JAZZ".into(), "Folk".into()])
            .await
            .unwrap();
        assert_eq!(ids.len(), 2);
    }

    #[tokio::test]
    async fn resolve_rejects_unknown_name() {
        let pool = create_memory_pool().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();

        let err = resolve(&mut conn, &["Jazz".into(), "Polka".into()])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Validation(ValidationError::UnknownGenre { ref name }) if name == "Polka"
        ));
    }
}
