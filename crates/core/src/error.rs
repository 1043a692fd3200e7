//! Error types for tunnelviz

use thiserror::Error;

/// Main error type for tunnelviz operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinate input: {0}")]
    Validation(String),

    #[error("Unsupported coordinate system: {0}")]
    UnknownCrs(String),

    #[error("Projection error: {0}")]
    Projection(String),

    #[error("No points to plot")]
    EmptyInput,
}

impl From<proj4rs::errors::Error> for Error {
    fn from(e: proj4rs::errors::Error) -> Self {
        Error::Projection(e.to_string())
    }
}

/// Result type alias for tunnelviz operations
pub type Result<T> = std::result::Result<T, Error>;
