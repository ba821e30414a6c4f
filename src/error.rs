use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::config::ConfigError;
use crate::models::{MovieId, UserId};

/// Failures reading from the catalog store
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Failed to query {table}: {source}")]
    Query {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Failures resolving users, columns and titles during recommendation
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("User {0} has no ratings")]
    UserNotFound(UserId),

    #[error("Movie {0} not found")]
    MovieNotFound(MovieId),

    #[error("Neighbor row {row} has no matching movie column ({columns} columns)")]
    ColumnOutOfRange { row: usize, columns: usize },

    #[error("Movie {0} is rated but missing from the movies table")]
    MissingTitle(MovieId),
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Lookup(LookupError::UserNotFound(_))
            | AppError::Lookup(LookupError::MovieNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Lookup(_) | AppError::Fetch(_) | AppError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
