use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    db::CatalogSource,
    middleware::request_id::{
        make_span_with_request_id, propagate_request_id_layer, set_request_id_layer,
    },
    services::Recommender,
};

pub mod movies;
pub mod recommendations;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogSource>,
    pub recommender: Recommender,
    pub default_n: usize,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogSource>, recommender: Recommender, default_n: usize) -> Self {
        Self {
            catalog,
            recommender,
            default_n,
        }
    }

    pub fn from_config(catalog: Arc<dyn CatalogSource>, config: &Config) -> Self {
        let recommender =
            Recommender::new(config.recommendation_policy).with_min_rating(config.min_rating);
        Self::new(catalog, recommender, config.n_recommendations)
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(Arc::new(state))
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(propagate_request_id_layer())
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(movies::list))
        .route("/movies/:movie_id", get(movies::get))
        .route(
            "/users/:user_id/recommendations",
            get(recommendations::recommend),
        )
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
