//! Error types for blockmm operations.
//!
//! Shape conformance between matrices is enforced by the type system (every
//! matrix in a kernel invocation shares the same const `N`), so the only
//! fallible surface left is constructing a matrix from untyped flat data.

use std::fmt;

/// Errors that can occur while building matrices from flat data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The supplied buffer does not hold exactly N·N elements.
    ShapeMismatch {
        /// Number of elements an N×N matrix requires.
        expected: usize,
        /// Number of elements actually supplied.
        actual: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ShapeMismatch { expected, actual } => write!(
                f,
                "shape mismatch: expected {} elements for a square matrix, got {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for Error {}

/// Result type alias for blockmm operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_display() {
        let error = Error::ShapeMismatch {
            expected: 16,
            actual: 12,
        };
        let display = format!("{}", error);
        assert!(display.contains("shape mismatch"));
        assert!(display.contains("16"));
        assert!(display.contains("12"));
    }
}
