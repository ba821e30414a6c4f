use std::time::Instant;

use tracing::instrument;

use crate::{
    db::{fetch_data, CatalogSource},
    error::AppResult,
    models::{MovieCatalog, Recommendations, UserId},
    services::{matrix::build_matrix, recommendations::Recommender},
};

/// Runs fetch, pivot and recommend for a single user
///
/// Every call reloads both tables and rebuilds the matrix; nothing is kept
/// between calls.
#[instrument(skip(source, recommender), fields(policy = %recommender.policy()))]
pub async fn recommend_for_user(
    source: &dyn CatalogSource,
    recommender: &Recommender,
    user_id: UserId,
    n: usize,
) -> AppResult<Recommendations> {
    let start = Instant::now();

    let (movies, ratings) = fetch_data(source).await?;
    let matrix = build_matrix(&ratings);
    let catalog = MovieCatalog::new(&movies);

    let recommendations = recommender.recommend(user_id, &matrix, &catalog, n)?;

    tracing::info!(
        processing_time_ms = start.elapsed().as_millis(),
        "Pipeline completed"
    );

    Ok(Recommendations {
        user_id,
        policy: recommender.policy(),
        recommendations,
    })
}
