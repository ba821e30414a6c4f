use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;
use std::sync::Arc;

use movie_recommender::{
    db::{CatalogSource, InMemoryCatalog},
    error::{FetchError, FetchResult},
    models::{Movie, MovieFilter, MovieId, Rating, RecommendationPolicy},
    routes::{create_router, AppState},
    services::Recommender,
};

fn scenario_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(
        vec![
            with_genre(Movie::new(1, "A"), "Drama"),
            with_genre(Movie::new(2, "B"), "Comedy"),
            with_genre(Movie::new(3, "C"), "Romantic Comedy"),
        ],
        vec![
            Rating::new(1, 1, 5.0),
            Rating::new(1, 2, 1.0),
            Rating::new(2, 1, 4.0),
            Rating::new(2, 3, 5.0),
            Rating::new(3, 2, 5.0),
        ],
    )
}

fn with_genre(movie: Movie, genre: &str) -> Movie {
    Movie {
        genre: Some(genre.to_string()),
        ..movie
    }
}

fn create_test_server(policy: RecommendationPolicy) -> TestServer {
    let state = AppState::new(Arc::new(scenario_catalog()), Recommender::new(policy), 5);
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

/// Source whose database is unreachable
struct UnreachableCatalog;

#[async_trait::async_trait]
impl CatalogSource for UnreachableCatalog {
    async fn fetch_movies(&self) -> FetchResult<Vec<Movie>> {
        Err(FetchError::Connect(sqlx::Error::PoolTimedOut))
    }

    async fn fetch_ratings(&self) -> FetchResult<Vec<Rating>> {
        Err(FetchError::Connect(sqlx::Error::PoolTimedOut))
    }

    async fn fetch_movie(&self, _movie_id: MovieId) -> FetchResult<Option<Movie>> {
        Err(FetchError::Connect(sqlx::Error::PoolTimedOut))
    }

    async fn search_movies(&self, _filter: MovieFilter) -> FetchResult<Vec<Movie>> {
        Err(FetchError::Connect(sqlx::Error::PoolTimedOut))
    }

    fn name(&self) -> &'static str {
        "unreachable"
    }
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(RecommendationPolicy::default());
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_list_movies() {
    let server = create_test_server(RecommendationPolicy::default());
    let response = server.get("/api/v1/movies").await;
    response.assert_status_ok();

    let movies: Vec<Value> = response.json();
    assert_eq!(movies.len(), 3);
    assert_eq!(movies[0]["movie_id"], 1);
    assert_eq!(movies[0]["title"], "A");
}

#[tokio::test]
async fn test_search_movies_by_title() {
    let server = create_test_server(RecommendationPolicy::default());
    let response = server
        .get("/api/v1/movies")
        .add_query_param("title", "b")
        .await;
    response.assert_status_ok();

    let movies: Vec<Value> = response.json();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["title"], "B");
}

#[tokio::test]
async fn test_search_movies_by_genre_and_title() {
    let server = create_test_server(RecommendationPolicy::default());
    let response = server
        .get("/api/v1/movies")
        .add_query_param("genre", "comedy")
        .await;
    response.assert_status_ok();

    let titles: Vec<String> = response
        .json::<Vec<Value>>()
        .iter()
        .map(|movie| movie["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["B", "C"]);

    let response = server
        .get("/api/v1/movies")
        .add_query_param("genre", "comedy")
        .add_query_param("title", "c")
        .await;
    let movies: Vec<Value> = response.json();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["title"], "C");

    let response = server
        .get("/api/v1/movies")
        .add_query_param("genre", "horror")
        .await;
    response.assert_status_ok();
    let movies: Vec<Value> = response.json();
    assert!(movies.is_empty());
}

#[tokio::test]
async fn test_empty_search_lists_everything() {
    let server = create_test_server(RecommendationPolicy::default());
    let response = server
        .get("/api/v1/movies")
        .add_query_param("title", "")
        .await;
    response.assert_status_ok();

    let movies: Vec<Value> = response.json();
    assert_eq!(movies.len(), 3);
}

#[tokio::test]
async fn test_get_movie() {
    let server = create_test_server(RecommendationPolicy::default());

    let response = server.get("/api/v1/movies/3").await;
    response.assert_status_ok();
    let movie: Value = response.json();
    assert_eq!(movie["title"], "C");

    let response = server.get("/api/v1/movies/99").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recommendations_neighbor_index() {
    let server = create_test_server(RecommendationPolicy::NeighborIndex);
    let response = server
        .get("/api/v1/users/1/recommendations")
        .add_query_param("n", 1)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["user_id"], 1);
    assert_eq!(body["policy"], "neighbor_index");
    assert_eq!(body["recommendations"], serde_json::json!(["B"]));
}

#[tokio::test]
async fn test_recommendations_neighbor_ratings() {
    let server = create_test_server(RecommendationPolicy::NeighborRatings);
    let response = server
        .get("/api/v1/users/1/recommendations")
        .add_query_param("n", 1)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["policy"], "neighbor_ratings");
    assert_eq!(body["recommendations"], serde_json::json!(["C"]));
}

#[tokio::test]
async fn test_policy_query_overrides_default() {
    let server = create_test_server(RecommendationPolicy::NeighborRatings);
    let response = server
        .get("/api/v1/users/1/recommendations")
        .add_query_param("n", 1)
        .add_query_param("policy", "neighbor_index")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["recommendations"], serde_json::json!(["B"]));
}

#[tokio::test]
async fn test_recommendations_truncated_to_user_pool() {
    let server = create_test_server(RecommendationPolicy::NeighborIndex);
    let response = server.get("/api/v1/users/1/recommendations").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_recommendations_unknown_user() {
    let server = create_test_server(RecommendationPolicy::default());
    let response = server.get("/api/v1/users/42/recommendations").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["error"], "User 42 has no ratings");
}

#[tokio::test]
async fn test_recommendations_rejects_zero_n() {
    let server = create_test_server(RecommendationPolicy::default());
    let response = server
        .get("/api/v1/users/1/recommendations")
        .add_query_param("n", 0)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommendations_rejects_n_above_limit() {
    let server = create_test_server(RecommendationPolicy::default());
    let response = server
        .get("/api/v1/users/1/recommendations")
        .add_query_param("n", 101)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid input: n must be between 1 and 100");
}

#[tokio::test]
async fn test_malformed_user_id_is_json_error() {
    let server = create_test_server(RecommendationPolicy::default());
    let response = server.get("/api/v1/users/abc/recommendations").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));
}

#[tokio::test]
async fn test_unknown_policy_is_json_error() {
    let server = create_test_server(RecommendationPolicy::default());
    let response = server
        .get("/api/v1/users/1/recommendations")
        .add_query_param("policy", "bogus")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));
}

#[tokio::test]
async fn test_malformed_movie_id_is_json_error() {
    let server = create_test_server(RecommendationPolicy::default());
    let response = server.get("/api/v1/movies/abc").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));
}

#[tokio::test]
async fn test_unreachable_store_is_server_error() {
    let state = AppState::new(Arc::new(UnreachableCatalog), Recommender::default(), 5);
    let server = TestServer::new(create_router(state)).unwrap();

    let response = server.get("/api/v1/users/1/recommendations").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let response = server.get("/api/v1/movies").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let response = server
        .get("/api/v1/movies")
        .add_query_param("title", "a")
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let server = create_test_server(RecommendationPolicy::default());

    let response = server.get("/health").await;
    let generated = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(generated.to_str().unwrap()).is_ok());

    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static("client-supplied-id"),
        )
        .await;
    assert_eq!(response.header("x-request-id"), "client-supplied-id");
}
