//! Venue endpoints
//!
//! Create and edit accept urlencoded forms; the matching GET routes return
//! what a form needs to render (genre choices, current values).

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use super::Outcome;
use crate::db::repos::{Genre, GenreRepo, SearchResults, Venue, VenueArea, VenueDetail, VenueRepo, VenueSummary};
use crate::http::error::ApiError;
use crate::http::extractors::{FormFields, ValidId};
use crate::http::server::AppState;
use crate::models::show::now;
use crate::models::{SearchTerm, VenueDraft};

/// What the create form needs
#[derive(Serialize)]
pub struct VenueForm {
    pub genre_choices: Vec<Genre>,
}

/// What the edit form needs
#[derive(Serialize)]
pub struct VenueEditForm {
    pub venue: Venue,
    pub genres: Vec<String>,
    pub genre_choices: Vec<Genre>,
}

/// GET /venues - venues grouped by city and state
async fn list_venues(State(state): State<Arc<AppState>>) -> Result<Json<Vec<VenueArea>>, ApiError> {
    let areas = VenueRepo::new(&state.pool).list_by_area(now()).await?;
    Ok(Json(areas))
}

/// POST /venues/search
async fn search_venues(
    State(state): State<Arc<AppState>>,
    form: FormFields,
) -> Result<Json<SearchResults<VenueSummary>>, ApiError> {
    let term = SearchTerm::from(&form);
    let results = VenueRepo::new(&state.pool).search(&term, now()).await?;
    tracing::debug!(term = term.as_str(), count = results.count, "venue search");
    Ok(Json(results))
}

/// GET /venues/{id}
async fn show_venue(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<VenueDetail>, ApiError> {
    Ok(Json(VenueRepo::new(&state.pool).detail(id, now()).await?))
}

/// GET /venues/create
async fn create_venue_form(State(state): State<Arc<AppState>>) -> Result<Json<VenueForm>, ApiError> {
    let genre_choices = GenreRepo::new(&state.pool).list().await?;
    Ok(Json(VenueForm { genre_choices }))
}

/// POST /venues/create
async fn create_venue(
    State(state): State<Arc<AppState>>,
    form: FormFields,
) -> Result<(StatusCode, Json<Outcome>), ApiError> {
    let draft = VenueDraft::from(&form);
    let failed = format!("An error occurred. Venue '{}' could not be listed.", draft.name.trim());

    let fields = draft.validate().map_err(|e| ApiError::from(e).during(failed.as_str()))?;
    let venue = VenueRepo::new(&state.pool)
        .create(&fields)
        .await
        .map_err(|e| ApiError::from(e).during(failed.as_str()))?;

    Ok((
        StatusCode::CREATED,
        Json(Outcome::new(
            venue.id,
            format!("Venue '{}' was successfully listed!", venue.name),
        )),
    ))
}

/// GET /venues/{id}/edit
async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<VenueEditForm>, ApiError> {
    let repo = VenueRepo::new(&state.pool);
    let venue = repo.get(id).await?;
    let genres = repo.genres(id).await?;
    let genre_choices = GenreRepo::new(&state.pool).list().await?;

    Ok(Json(VenueEditForm {
        venue,
        genres,
        genre_choices,
    }))
}

/// POST /venues/{id}/edit
async fn edit_venue(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    form: FormFields,
) -> Result<Json<Outcome>, ApiError> {
    let draft = VenueDraft::from(&form);
    let failed = format!("An error occurred. Venue '{}' could not be updated.", draft.name.trim());

    let fields = draft.validate().map_err(|e| ApiError::from(e).during(failed.as_str()))?;
    let venue = VenueRepo::new(&state.pool)
        .update(id, &fields)
        .await
        .map_err(|e| ApiError::from(e).during(failed.as_str()))?;

    Ok(Json(Outcome::new(
        venue.id,
        format!("Venue '{}' was successfully updated!", venue.name),
    )))
}

/// DELETE /venues/{id} - refused while shows reference the venue
async fn delete_venue(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Outcome>, ApiError> {
    let repo = VenueRepo::new(&state.pool);
    let venue = repo.get(id).await?;

    repo.delete(id).await.map_err(|e| {
        ApiError::from(e).during(format!(
            "An error occurred. Venue '{}' could not be deleted.",
            venue.name
        ))
    })?;

    Ok(Json(Outcome::new(
        id,
        format!("Venue '{}' was successfully deleted.", venue.name),
    )))
}

/// Venue routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(create_venue_form).post(create_venue))
        .route("/venues/{id}", get(show_venue).delete(delete_venue))
        .route("/venues/{id}/edit", get(edit_venue_form).post(edit_venue))
}
