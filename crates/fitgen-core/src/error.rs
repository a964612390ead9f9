use thiserror::Error;

/// Core error type shared across fitgen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A generated value falls outside its declared domain.
    #[error("value out of domain: {0}")]
    OutOfDomain(String),
    /// A stored value could not be parsed back into the model.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Convenience alias for results returned by fitgen crates.
pub type Result<T> = std::result::Result<T, Error>;
