//! Error types for the document platform collaborators.
//!
//! Covers document lookup, token retrieval, export fetches and local file
//! storage. These are reported as-is; nothing here is retried.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the document platform, token provider or file store.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The platform rejected the bearer token.
    #[error(
        "[AUTH] access denied (HTTP {status}) fetching {url}\n  Suggestion: Refresh the access token ({token_hint}) and check the document is shared with that account"
    )]
    AuthRequired {
        /// The URL that was denied.
        url: String,
        /// The HTTP status code (401 or 403).
        status: u16,
        /// Where the token usually comes from.
        token_hint: String,
    },

    /// No access token could be obtained.
    #[error("no access token available: {reason}\n  Suggestion: Export a short-lived OAuth token in ${var}")]
    MissingToken {
        /// Environment variable consulted.
        var: String,
        /// Why the token is unavailable.
        reason: String,
    },

    /// The document URL or id is malformed.
    #[error("invalid document URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The platform answered with a body that could not be understood.
    #[error("unexpected response from {url}: {reason}")]
    InvalidResponse {
        /// The URL whose response was unusable.
        url: String,
        /// What was wrong with it.
        reason: String,
    },

    /// File system error while storing the exported file.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// HTTP client construction failed.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl PlatformError {
    /// Creates a network error from a reqwest error, promoting timeouts.
    pub fn from_transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url }
        } else {
            Self::Network { url, source }
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an authentication error for a 401/403 response.
    pub fn auth_required(url: impl Into<String>, status: u16, token_hint: impl Into<String>) -> Self {
        Self::AuthRequired {
            url: url.into(),
            status,
            token_hint: token_hint.into(),
        }
    }

    /// Creates a missing-token error.
    pub fn missing_token(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MissingToken {
            var: var.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid document URL error.
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid response error.
    pub fn invalid_response(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// No `From<reqwest::Error>` / `From<std::io::Error>`: every variant needs the
// url or path the source error lacks.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display() {
        let msg = PlatformError::http_status("https://docs.example.com/export", 404).to_string();
        assert!(msg.contains("404"), "Expected '404' in: {msg}");
        assert!(msg.contains("https://docs.example.com/export"), "Expected URL in: {msg}");
    }

    #[test]
    fn test_auth_required_display_mentions_token_source() {
        let msg = PlatformError::auth_required("https://docs.example.com/x", 401, "$SHEETS_EXPORT_ACCESS_TOKEN")
            .to_string();
        assert!(msg.starts_with("[AUTH]"), "Expected [AUTH] prefix in: {msg}");
        assert!(msg.contains("401"));
        assert!(msg.contains("$SHEETS_EXPORT_ACCESS_TOKEN"));
    }

    #[test]
    fn test_missing_token_display() {
        let msg = PlatformError::missing_token("MY_TOKEN", "variable is not set").to_string();
        assert!(msg.contains("variable is not set"));
        assert!(msg.contains("$MY_TOKEN"));
    }

    #[test]
    fn test_io_display() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let msg = PlatformError::io(PathBuf::from("/tmp/report.pdf"), source).to_string();
        assert!(msg.contains("/tmp/report.pdf"), "Expected path in: {msg}");
    }
}
