//! Error types for chart operations

use std::fmt;
use thiserror::Error;

/// A required field of a chart block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The `layout:` line naming the chart kind
    Layout,
    /// The `data:` block holding the points
    Data,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Layout => write!(f, "layout"),
            Field::Data => write!(f, "data"),
        }
    }
}

/// Errors that can occur while parsing or rendering chart blocks
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// A required field is absent or empty
    #[error("{0} not found")]
    MissingField(Field),
    /// The data block could not be coerced into a list of points
    #[error("failed to parse chart data: {cause}")]
    MalformedData { cause: String },
    /// No handler is registered for a fence label
    #[error("no handler registered for '{0}'")]
    HandlerNotFound(String),
    /// Writing HTML failed
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ChartError {
    pub(crate) fn malformed(cause: impl fmt::Display) -> Self {
        ChartError::MalformedData {
            cause: cause.to_string(),
        }
    }
}
