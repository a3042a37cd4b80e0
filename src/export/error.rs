//! Error types for export configuration and resolution.

use thiserror::Error;

use crate::platform::PlatformError;
use crate::range::RangeError;

/// Errors returned by [`SheetsExporter`](super::SheetsExporter).
#[derive(Debug, Error)]
pub enum ExportError {
    /// A builder argument was missing or not acceptable.
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// The selected sheet does not exist in the document.
    #[error(
        "sheet {selector} not found in spreadsheet '{document}'\n  Suggestion: Available sheets: {available}"
    )]
    NotFound {
        /// Human-readable selector (`named "Q1"` / `at index 4`).
        selector: String,
        /// Document display name.
        document: String,
        /// Comma-separated sheet names, for the suggestion line.
        available: String,
    },

    /// The export range notation is malformed.
    #[error(transparent)]
    InvalidFormat(#[from] RangeError),

    /// A platform collaborator failed.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

impl ExportError {
    /// Creates an `InvalidArgument` error.
    #[must_use]
    pub fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }

    /// Creates a `NotFound` error listing the sheets that do exist.
    #[must_use]
    pub fn sheet_not_found<'a>(
        selector: impl std::fmt::Display,
        document: &str,
        available: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let available = available.into_iter().collect::<Vec<_>>().join(", ");
        Self::NotFound {
            selector: selector.to_string(),
            document: document.to_string(),
            available: if available.is_empty() {
                "<none>".to_string()
            } else {
                available
            },
        }
    }
}
