//! Show endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Outcome;
use crate::db::repos::{ArtistRepo, ArtistSummary, ShowListing, ShowRepo, VenueChoice, VenueRepo};
use crate::http::error::ApiError;
use crate::http::extractors::FormFields;
use crate::http::server::AppState;
use crate::models::show::now;
use crate::models::{Paginated, Pagination, PaginationParams, ShowDraft};

/// What the create form needs
#[derive(Serialize)]
pub struct ShowForm {
    pub artists: Vec<ArtistSummary>,
    pub venues: Vec<VenueChoice>,
    pub default_start_time: DateTime<Utc>,
}

/// GET /shows - upcoming shows, earliest first
async fn list_shows(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<ShowListing>>, ApiError> {
    let page = Pagination::from(params);
    Ok(Json(ShowRepo::new(&state.pool).list_upcoming(now(), page).await?))
}

/// GET /shows/create
async fn create_show_form(State(state): State<Arc<AppState>>) -> Result<Json<ShowForm>, ApiError> {
    let artists = ArtistRepo::new(&state.pool).choices().await?;
    let venues = VenueRepo::new(&state.pool).choices().await?;

    Ok(Json(ShowForm {
        artists,
        venues,
        default_start_time: now(),
    }))
}

/// POST /shows/create
async fn create_show(
    State(state): State<Arc<AppState>>,
    form: FormFields,
) -> Result<(StatusCode, Json<Outcome>), ApiError> {
    const FAILED: &str = "An error occurred. Show could not be listed.";

    let new_show = ShowDraft::from(&form)
        .validate()
        .map_err(|e| ApiError::from(e).during(FAILED))?;
    let show = ShowRepo::new(&state.pool)
        .create(&new_show)
        .await
        .map_err(|e| ApiError::from(e).during(FAILED))?;

    Ok((
        StatusCode::CREATED,
        Json(Outcome::new(show.id, "Show was successfully listed!")),
    ))
}

/// Show routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(create_show_form).post(create_show))
}
