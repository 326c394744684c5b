use thiserror::Error;

/// Errors that abort a whole run: the store or the make API is unreachable,
/// or returned something unusable.
#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Db(#[from] duckdb::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing environment variable {0}")]
    MissingEnv(String),

    #[error("store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, Error>;
