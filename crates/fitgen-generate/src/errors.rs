use thiserror::Error;

use crate::store::StoreError;

/// Errors emitted by the generation engine.
///
/// Unit failures are not errors at this level; they are recorded in the
/// report and the run continues.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error("schema setup failed: {0}")]
    Schema(StoreError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
