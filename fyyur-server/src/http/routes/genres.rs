//! Genre choices

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::db::repos::{Genre, GenreRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET /genres - every selectable genre, by name
async fn list_genres(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Genre>>, ApiError> {
    Ok(Json(GenreRepo::new(&state.pool).list().await?))
}

/// Genre routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/genres", get(list_genres))
}
