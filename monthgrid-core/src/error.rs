//! Error types for monthgrid.

use thiserror::Error;

/// Errors that can occur in monthgrid operations.
///
/// None of these ever escape the reducer: a transition that hits one leaves
/// the state as it was.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for monthgrid operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
