use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    config::MAX_RECOMMENDATIONS,
    error::{AppError, AppResult},
    models::{RecommendationPolicy, Recommendations, UserId},
    routes::AppState,
    services::recommend_for_user,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub n: Option<usize>,
    pub policy: Option<RecommendationPolicy>,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    path: Result<Path<UserId>, PathRejection>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> AppResult<Json<Recommendations>> {
    let Path(user_id) = path?;
    let Query(params) = query?;

    let n = params.n.unwrap_or(state.default_n);
    if n == 0 || n > MAX_RECOMMENDATIONS {
        return Err(AppError::InvalidInput(format!(
            "n must be between 1 and {}",
            MAX_RECOMMENDATIONS
        )));
    }

    let recommender = match params.policy {
        Some(policy) => state.recommender.with_policy(policy),
        None => state.recommender,
    };

    tracing::info!(user_id, n, policy = %recommender.policy(), "Processing recommendation request");

    let recommendations =
        recommend_for_user(state.catalog.as_ref(), &recommender, user_id, n).await?;
    Ok(Json(recommendations))
}
