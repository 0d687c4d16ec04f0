//! Checker framework errors

use thiserror::Error;

use crate::storage::RepositoryError;

/// Errors raised by the checker framework and concrete checks
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CheckerError {
    #[error("Unknown checker: '{0}'")]
    Resolution(String),

    #[error("Checker '{0}' has no registration row in the metadata store")]
    Unregistered(String),

    #[error("Date interval is incomplete: from_date and to_date must be supplied together")]
    IncompleteInterval,

    #[error("Parameter '{0}' must follow the format name=value")]
    ParameterFormat(String),

    #[error("Invalid date '{value}': {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Store error: {0}")]
    Store(#[from] RepositoryError),
}
