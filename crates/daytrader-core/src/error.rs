//! Error types for the daytrader toolkit.

use thiserror::Error;

/// Market data and reference data errors.
///
/// Provider calls surface one of these to the caller instead of collapsing
/// every failure into an empty result.
#[derive(Error, Debug)]
pub enum DataError {
    /// The provider answered, but there were no bars for the request.
    #[error("No data available for the requested range")]
    NoDataAvailable,

    /// Transport failure, non-success status, or an error reported by the provider.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The provider answered with a body that does not have the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Whether this error only means "nothing to show".
    pub fn is_no_data(&self) -> bool {
        matches!(self, DataError::NoDataAvailable)
    }
}

/// Indicator construction errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Trade journal errors.
#[derive(Error, Debug)]
pub enum JournalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}
