//! Error types for the bolster runtime.
//!
//! Two kinds cover every hard failure in the library: structurally invalid
//! call-site usage and numeric range violations. Parse-style operations do
//! not error at all — they return the `NaN` sentinel instead.

/// Result type for bolster operations
pub type Result<T> = std::result::Result<T, Error>;

/// Runtime error raised by bolster operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Wrong type or missing required parameter at a call site
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Numeric parameter outside the permitted range
    #[error("out of range: {0}")]
    OutOfRange(String),
}

impl Error {
    /// Create an `InvalidArgument` error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Create an `OutOfRange` error
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Error::OutOfRange(msg.into())
    }

    /// Whether this is an `InvalidArgument` error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// Whether this is an `OutOfRange` error
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Error::OutOfRange(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_prefix() {
        let e = Error::invalid_argument("range requires numeric bounds");
        assert_eq!(e.to_string(), "invalid argument: range requires numeric bounds");

        let e = Error::out_of_range("pad count must not be negative");
        assert_eq!(e.to_string(), "out of range: pad count must not be negative");
    }

    #[test]
    fn test_kind_predicates() {
        assert!(Error::invalid_argument("x").is_invalid_argument());
        assert!(!Error::invalid_argument("x").is_out_of_range());
        assert!(Error::out_of_range("x").is_out_of_range());
    }
}
