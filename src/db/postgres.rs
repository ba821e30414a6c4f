use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, QueryBuilder};

use crate::{
    db::CatalogSource,
    error::{FetchError, FetchResult},
    models::{Movie, MovieFilter, MovieId, Rating},
};

/// Creates a PostgreSQL connection pool
///
/// The pool is created once per run and handed to [`PgCatalog`]; call
/// `close` on it when the run is finished.
pub async fn create_pool(database_url: &str, max_connections: u32) -> FetchResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(FetchError::Connect)?;

    Ok(pool)
}

/// Catalog backed by the `movies` and `ratings` tables
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl CatalogSource for PgCatalog {
    async fn fetch_movies(&self) -> FetchResult<Vec<Movie>> {
        sqlx::query_as::<_, Movie>("SELECT * FROM movies")
            .fetch_all(&self.pool)
            .await
            .map_err(|source| FetchError::Query {
                table: "movies",
                source,
            })
    }

    async fn fetch_ratings(&self) -> FetchResult<Vec<Rating>> {
        sqlx::query_as::<_, Rating>("SELECT * FROM ratings")
            .fetch_all(&self.pool)
            .await
            .map_err(|source| FetchError::Query {
                table: "ratings",
                source,
            })
    }

    async fn fetch_movie(&self, movie_id: MovieId) -> FetchResult<Option<Movie>> {
        sqlx::query_as::<_, Movie>("SELECT * FROM movies WHERE movie_id = $1 LIMIT 1")
            .bind(movie_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|source| FetchError::Query {
                table: "movies",
                source,
            })
    }

    async fn search_movies(&self, filter: MovieFilter) -> FetchResult<Vec<Movie>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM movies WHERE TRUE");
        if let Some(title) = filter.title.as_deref() {
            query.push(" AND title ILIKE ").push_bind(like_pattern(title));
        }
        if let Some(genre) = filter.genre.as_deref() {
            query.push(" AND genre ILIKE ").push_bind(like_pattern(genre));
        }

        query
            .build_query_as::<Movie>()
            .fetch_all(&self.pool)
            .await
            .map_err(|source| FetchError::Query {
                table: "movies",
                source,
            })
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}

/// `%needle%` with LIKE wildcards in `needle` escaped
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_needle() {
        assert_eq!(like_pattern("heat"), "%heat%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("100%_a\\b"), "%100\\%\\_a\\\\b%");
    }
}
