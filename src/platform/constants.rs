//! Constants for the platform module (endpoints, timeouts, token source).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes; large PDF renders are slow).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Base URL of the spreadsheet metadata API.
pub const DEFAULT_API_BASE_URL: &str = "https://sheets.googleapis.com";

/// Base URL of the document host serving `/spreadsheets/d/<id>/export`.
pub const DEFAULT_DOCS_BASE_URL: &str = "https://docs.google.com";

/// Environment variable read by [`EnvTokenProvider`](super::EnvTokenProvider) by default.
pub const DEFAULT_TOKEN_ENV: &str = "SHEETS_EXPORT_ACCESS_TOKEN";
