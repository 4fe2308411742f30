//! Artist endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use super::Outcome;
use crate::db::repos::{Artist, ArtistDetail, ArtistMatch, ArtistRepo, ArtistSummary, Genre, GenreRepo, SearchResults};
use crate::http::error::ApiError;
use crate::http::extractors::{FormFields, ValidId};
use crate::http::server::AppState;
use crate::models::show::now;
use crate::models::{ArtistDraft, Paginated, Pagination, PaginationParams, SearchTerm};

/// What the create form needs
#[derive(Serialize)]
pub struct ArtistForm {
    pub genre_choices: Vec<Genre>,
}

/// What the edit form needs
#[derive(Serialize)]
pub struct ArtistEditForm {
    pub artist: Artist,
    pub genres: Vec<String>,
    pub genre_choices: Vec<Genre>,
}

/// GET /artists - id and name, paginated
async fn list_artists(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<ArtistSummary>>, ApiError> {
    let page = Pagination::from(params);
    Ok(Json(ArtistRepo::new(&state.pool).list(page).await?))
}

/// POST /artists/search
async fn search_artists(
    State(state): State<Arc<AppState>>,
    form: FormFields,
) -> Result<Json<SearchResults<ArtistMatch>>, ApiError> {
    let term = SearchTerm::from(&form);
    let results = ArtistRepo::new(&state.pool).search(&term, now()).await?;
    tracing::debug!(term = term.as_str(), count = results.count, "artist search");
    Ok(Json(results))
}

/// GET /artists/{id}
async fn show_artist(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<ArtistDetail>, ApiError> {
    Ok(Json(ArtistRepo::new(&state.pool).detail(id, now()).await?))
}

/// GET /artists/create
async fn create_artist_form(State(state): State<Arc<AppState>>) -> Result<Json<ArtistForm>, ApiError> {
    let genre_choices = GenreRepo::new(&state.pool).list().await?;
    Ok(Json(ArtistForm { genre_choices }))
}

/// POST /artists/create
async fn create_artist(
    State(state): State<Arc<AppState>>,
    form: FormFields,
) -> Result<(StatusCode, Json<Outcome>), ApiError> {
    let draft = ArtistDraft::from(&form);
    let failed = format!("An error occurred. Artist '{}' could not be listed.", draft.name.trim());

    let fields = draft.validate().map_err(|e| ApiError::from(e).during(failed.as_str()))?;
    let artist = ArtistRepo::new(&state.pool)
        .create(&fields)
        .await
        .map_err(|e| ApiError::from(e).during(failed.as_str()))?;

    Ok((
        StatusCode::CREATED,
        Json(Outcome::new(
            artist.id,
            format!("Artist '{}' was successfully listed!", artist.name),
        )),
    ))
}

/// GET /artists/{id}/edit
async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<ArtistEditForm>, ApiError> {
    let repo = ArtistRepo::new(&state.pool);
    let artist = repo.get(id).await?;
    let genres = repo.genres(id).await?;
    let genre_choices = GenreRepo::new(&state.pool).list().await?;

    Ok(Json(ArtistEditForm {
        artist,
        genres,
        genre_choices,
    }))
}

/// POST /artists/{id}/edit
async fn edit_artist(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    form: FormFields,
) -> Result<Json<Outcome>, ApiError> {
    let draft = ArtistDraft::from(&form);
    let failed = format!("An error occurred. Artist '{}' could not be updated.", draft.name.trim());

    let fields = draft.validate().map_err(|e| ApiError::from(e).during(failed.as_str()))?;
    let artist = ArtistRepo::new(&state.pool)
        .update(id, &fields)
        .await
        .map_err(|e| ApiError::from(e).during(failed.as_str()))?;

    Ok(Json(Outcome::new(
        artist.id,
        format!("Artist '{}' was successfully updated!", artist.name),
    )))
}

/// DELETE /artists/{id} - refused while shows reference the artist
async fn delete_artist(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Outcome>, ApiError> {
    let repo = ArtistRepo::new(&state.pool);
    let artist = repo.get(id).await?;

    repo.delete(id).await.map_err(|e| {
        ApiError::from(e).during(format!(
            "An error occurred. Artist '{}' could not be deleted.",
            artist.name
        ))
    })?;

    Ok(Json(Outcome::new(
        id,
        format!("Artist '{}' was successfully deleted.", artist.name),
    )))
}

/// Artist routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(create_artist_form).post(create_artist))
        .route("/artists/{id}", get(show_artist).delete(delete_artist))
        .route("/artists/{id}/edit", get(edit_artist_form).post(edit_artist))
}
