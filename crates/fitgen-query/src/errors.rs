use thiserror::Error;

/// Errors emitted by the query runner.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("invalid catalog pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown query label: {0}")]
    UnknownLabel(String),
    #[error("query '{0}' expects a parameter")]
    MissingParameter(String),
    #[error("unsupported: {0}")]
    Unsupported(String),
}
