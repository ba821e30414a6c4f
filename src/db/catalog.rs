use std::time::Instant;

use tracing::instrument;

use crate::{
    error::FetchResult,
    models::{Movie, MovieFilter, MovieId, Rating},
};

/// Read access to the movies and ratings tables
///
/// Each call returns a full snapshot of the table. There is no streaming or
/// pagination.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// All rows of the movies table
    async fn fetch_movies(&self) -> FetchResult<Vec<Movie>>;

    /// All rows of the ratings table
    async fn fetch_ratings(&self) -> FetchResult<Vec<Rating>>;

    /// A single movie by id
    async fn fetch_movie(&self, movie_id: MovieId) -> FetchResult<Option<Movie>>;

    /// Movies whose title and genre contain the filter's substrings
    async fn search_movies(&self, filter: MovieFilter) -> FetchResult<Vec<Movie>>;

    /// Source name for logging
    fn name(&self) -> &'static str;
}

/// Loads both tables, movies first, then ratings
#[instrument(skip_all, fields(source = source.name()))]
pub async fn fetch_data(source: &dyn CatalogSource) -> FetchResult<(Vec<Movie>, Vec<Rating>)> {
    let start = Instant::now();

    let movies = source.fetch_movies().await?;
    let ratings = source.fetch_ratings().await?;

    tracing::info!(
        movies = movies.len(),
        ratings = ratings.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Catalog data fetched"
    );

    Ok((movies, ratings))
}
