use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("No movies matched the filters.")]
    NoMatch,

    #[error("No valid embeddings found for the filtered movies.")]
    NoEmbeddings,

    #[error("Failed to build similarity index: {0}")]
    IndexBuild(String),

    /// Interaction logging failure. Only ever logged, never returned to a client.
    #[error("Failed to record interaction: {0}")]
    Recorder(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Embedding model error: {0}")]
    Embedding(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable tag that lets clients tell failure kinds apart
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::NoMatch => "no_match",
            AppError::NoEmbeddings => "no_embeddings",
            AppError::IndexBuild(_) => "index_build",
            AppError::Recorder(_) => "recorder",
            AppError::Database(_) => "database",
            AppError::Cache(_) => "cache",
            AppError::HttpClient(_) | AppError::Embedding(_) => "embedding",
            AppError::Internal(_) => "internal",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NoMatch | AppError::NoEmbeddings => StatusCode::NOT_FOUND,
            AppError::HttpClient(_) | AppError::Embedding(_) => StatusCode::BAD_GATEWAY,
            AppError::IndexBuild(_)
            | AppError::Recorder(_)
            | AppError::Database(_)
            | AppError::Cache(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, kind = self.kind(), "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
            "kind": self.kind(),
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
