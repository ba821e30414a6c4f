use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use std::sync::Arc;

use crate::{
    error::{AppResult, LookupError},
    models::{Movie, MovieFilter, MovieId},
    routes::AppState,
};

/// Handler listing movies, optionally filtered by `title` and `genre` substrings
pub async fn list(
    State(state): State<Arc<AppState>>,
    query: Result<Query<MovieFilter>, QueryRejection>,
) -> AppResult<Json<Vec<Movie>>> {
    let Query(filter) = query?;
    let filter = filter.normalized();

    let movies = if filter.is_empty() {
        state.catalog.fetch_movies().await?
    } else {
        state.catalog.search_movies(filter.clone()).await?
    };

    tracing::debug!(
        count = movies.len(),
        title = ?filter.title,
        genre = ?filter.genre,
        "Listing movies"
    );
    Ok(Json(movies))
}

/// Handler returning a single movie
pub async fn get(
    State(state): State<Arc<AppState>>,
    path: Result<Path<MovieId>, PathRejection>,
) -> AppResult<Json<Movie>> {
    let Path(movie_id) = path?;
    let movie = state
        .catalog
        .fetch_movie(movie_id)
        .await?
        .ok_or(LookupError::MovieNotFound(movie_id))?;
    Ok(Json(movie))
}
