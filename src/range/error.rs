//! Error types for range notation parsing.

use thiserror::Error;

/// Errors that can occur while parsing `A1`-style range notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// The notation does not match the column-letters + row-digits pattern.
    #[error("invalid range notation '{notation}': {reason}\n  Suggestion: {suggestion}")]
    InvalidFormat {
        /// The offending notation (a cell, a column run, or a whole range).
        notation: String,
        /// Why it was rejected
        reason: String,
        /// How to fix the issue
        suggestion: &'static str,
    },
}

impl RangeError {
    /// Creates an `InvalidFormat` error for a malformed cell address.
    #[must_use]
    pub fn malformed_cell(cell: &str) -> Self {
        Self::InvalidFormat {
            notation: cell.to_string(),
            reason: "expected column letters followed by a row number".to_string(),
            suggestion: "Use addresses like B12 or AA1",
        }
    }

    /// Creates an `InvalidFormat` error for a bad column letter run.
    #[must_use]
    pub fn invalid_column(letters: &str, reason: &str) -> Self {
        Self::InvalidFormat {
            notation: letters.to_string(),
            reason: reason.to_string(),
            suggestion: "Columns use the letters A-Z only (A, Z, AA, AZ, ...)",
        }
    }

    /// Creates an `InvalidFormat` error for a row that is zero or out of range.
    #[must_use]
    pub fn invalid_row(cell: &str) -> Self {
        Self::InvalidFormat {
            notation: cell.to_string(),
            reason: "row number must be a positive integer".to_string(),
            suggestion: "Rows start at 1",
        }
    }

    /// Creates an `InvalidFormat` error for a range with more than two corners.
    #[must_use]
    pub fn too_many_corners(notation: &str) -> Self {
        Self::InvalidFormat {
            notation: notation.to_string(),
            reason: "a range has at most one ':' separator".to_string(),
            suggestion: "Use a single cell (B2) or two corners (A1:C10)",
        }
    }
}
