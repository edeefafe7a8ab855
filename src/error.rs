//! Error types for query construction and evaluation.
//!
//! Every failure a query can report falls into one of four kinds. Callers
//! match on the variant to tell them apart; the message is for humans.

use thiserror::Error;

/// Errors raised while building or evaluating a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A precondition on an argument was violated. Raised when the operator
    /// is constructed, never deferred to iteration.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A throwing element accessor found no qualifying element (or, for
    /// `single`, more than one).
    #[error("no such element: {0}")]
    NoSuchElement(String),

    /// An element pulled through `cast` could not be converted.
    #[error("invalid cast: cannot convert element of type {from} to {to}")]
    InvalidCast {
        from: &'static str,
        to: &'static str,
    },

    /// Two values had no defined order (for example a NaN float).
    #[error("values are not comparable: {0}")]
    NotComparable(String),
}

impl QueryError {
    pub(crate) fn no_such_element(msg: impl Into<String>) -> Self {
        Self::NoSuchElement(msg.into())
    }

    pub(crate) fn not_comparable(msg: impl Into<String>) -> Self {
        Self::NotComparable(msg.into())
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
