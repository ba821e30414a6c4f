use crate::{
    db::CatalogSource,
    error::FetchResult,
    models::{Movie, MovieFilter, MovieId, Rating},
};

/// Catalog held entirely in memory
///
/// Serves a fixed snapshot of both tables. Rows are returned in insertion
/// order, the same way a table scan would return them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    movies: Vec<Movie>,
    ratings: Vec<Rating>,
}

impl InMemoryCatalog {
    pub fn new(movies: Vec<Movie>, ratings: Vec<Rating>) -> Self {
        Self { movies, ratings }
    }
}

#[async_trait::async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn fetch_movies(&self) -> FetchResult<Vec<Movie>> {
        Ok(self.movies.clone())
    }

    async fn fetch_ratings(&self) -> FetchResult<Vec<Rating>> {
        Ok(self.ratings.clone())
    }

    async fn fetch_movie(&self, movie_id: MovieId) -> FetchResult<Option<Movie>> {
        Ok(self
            .movies
            .iter()
            .find(|movie| movie.movie_id == movie_id)
            .cloned())
    }

    async fn search_movies(&self, filter: MovieFilter) -> FetchResult<Vec<Movie>> {
        Ok(self
            .movies
            .iter()
            .filter(|movie| filter.matches(movie))
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
