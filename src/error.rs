use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Model not loaded")]
    ModelNotLoaded,

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ModelNotLoaded => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AppError::ExternalApi(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::HttpClient(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Errors raised while loading the catalog and similarity artifacts at startup
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode JSON artifact {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to decode bincode artifact {path}: {source}")]
    Bincode {
        path: String,
        #[source]
        source: bincode::Error,
    },

    #[error("Similarity row {row} has {found} entries, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Similarity table has {table} rows but catalog has {catalog} movies")]
    SizeMismatch { catalog: usize, table: usize },

    #[error("Similarity score at ({row}, {col}) is not a finite number")]
    NonFiniteScore { row: usize, col: usize },

    #[error("Catalog column {column} has positions that are not 0..{expected}")]
    NonContiguousPositions { column: &'static str, expected: usize },

    #[error("Catalog columns have different lengths: {movie_id} ids, {title} titles, {tags} tags")]
    ColumnLengthMismatch {
        movie_id: usize,
        title: usize,
        tags: usize,
    },
}
