//! Shared HTTP client construction for platform requests.
//!
//! Metadata lookups and export fetches use the same client policy:
//! connect/read timeouts, gzip, and the tool-identifying User-Agent.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use super::PlatformError;
use crate::user_agent;

/// Builds the reqwest client used by [`SheetsApiClient`](super::SheetsApiClient).
///
/// # Errors
///
/// Returns [`PlatformError::ClientBuild`] if the TLS backend or system
/// configuration prevents client construction.
pub fn build_platform_http_client(
    connect_timeout_secs: u64,
    read_timeout_secs: u64,
) -> Result<Client, PlatformError> {
    debug!(
        connect_timeout_secs,
        read_timeout_secs, "building platform HTTP client"
    );
    Client::builder()
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .timeout(Duration::from_secs(read_timeout_secs))
        .gzip(true)
        .user_agent(user_agent::default_user_agent())
        .build()
        .map_err(|source| PlatformError::ClientBuild { source })
}
