//! Spreadsheet platform client: metadata lookup and export fetches.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::{debug, info, instrument};
use url::Url;

use super::constants::{
    CONNECT_TIMEOUT_SECS, DEFAULT_API_BASE_URL, DEFAULT_DOCS_BASE_URL, READ_TIMEOUT_SECS,
};
use super::http_client::build_platform_http_client;
use super::{
    DocumentSource, ExportFetcher, PlatformError, SheetHandle, SpreadsheetDocument, TokenProvider,
};

/// Partial-response field mask for the metadata request.
const METADATA_FIELDS: &str = "spreadsheetId,properties.title,sheets.properties(sheetId,title,index)";

/// Final-URL fragments that indicate the platform bounced us to a sign-in page.
const LOGIN_PATTERNS: &[&str] = &["accounts.google.", "servicelogin", "/signin", "/login"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpreadsheetMetadata {
    spreadsheet_id: String,
    properties: SpreadsheetProperties,
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    #[serde(default)]
    sheet_id: i64,
    title: String,
    #[serde(default)]
    index: usize,
}

/// Talks to the spreadsheet metadata API and the document export endpoint.
///
/// Implements both [`DocumentSource`] and [`ExportFetcher`]. Metadata requests
/// are authorized with the same [`TokenProvider`] the exporter uses.
#[derive(Clone)]
pub struct SheetsApiClient {
    client: Client,
    tokens: Arc<dyn TokenProvider>,
    api_base_url: String,
    docs_base_url: String,
}

impl SheetsApiClient {
    /// Creates a client against the public endpoints with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(tokens: Arc<dyn TokenProvider>) -> Result<Self, PlatformError> {
        Self::with_timeouts(tokens, CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a client with explicit timeout values.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::ClientBuild`] if the HTTP client cannot be built.
    pub fn with_timeouts(
        tokens: Arc<dyn TokenProvider>,
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, PlatformError> {
        Ok(Self {
            client: build_platform_http_client(connect_timeout_secs, read_timeout_secs)?,
            tokens,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            docs_base_url: DEFAULT_DOCS_BASE_URL.to_string(),
        })
    }

    /// Overrides the metadata API base URL.
    #[must_use]
    pub fn with_api_base_url(mut self, base: impl Into<String>) -> Self {
        self.api_base_url = trim_base(base.into());
        self
    }

    /// Overrides the document host serving export requests.
    #[must_use]
    pub fn with_docs_base_url(mut self, base: impl Into<String>) -> Self {
        self.docs_base_url = trim_base(base.into());
        self
    }

    /// The token provider shared with the exporter.
    #[must_use]
    pub fn tokens(&self) -> Arc<dyn TokenProvider> {
        Arc::clone(&self.tokens)
    }

    /// Export endpoint for a document id.
    #[must_use]
    pub fn export_base_url(&self, spreadsheet_id: &str) -> String {
        format!(
            "{}/spreadsheets/d/{spreadsheet_id}/export",
            self.docs_base_url
        )
    }

    async fn get(&self, url: &str, token: &str) -> Result<reqwest::Response, PlatformError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| PlatformError::from_transport(url, e))?;
        self.check_status(url, response)
    }

    fn check_status(
        &self,
        url: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, PlatformError> {
        let status = response.status().as_u16();
        if matches!(status, 401 | 403) {
            return Err(PlatformError::auth_required(url, status, self.tokens.describe()));
        }
        if !response.status().is_success() {
            return Err(PlatformError::http_status(url, status));
        }
        Ok(response)
    }
}

impl std::fmt::Debug for SheetsApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsApiClient")
            .field("api_base_url", &self.api_base_url)
            .field("docs_base_url", &self.docs_base_url)
            .field("tokens", &self.tokens.describe())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DocumentSource for SheetsApiClient {
    #[instrument(skip(self), fields(url = %url))]
    async fn open_by_url(&self, url: &str) -> Result<SpreadsheetDocument, PlatformError> {
        let id = extract_spreadsheet_id(url)?;
        let token = self.tokens.access_token().await?;
        let request_url = metadata_url(&self.api_base_url, &id)?;

        let response = self.get(&request_url, &token).await?;

        let metadata: SpreadsheetMetadata = response
            .json()
            .await
            .map_err(|e| PlatformError::invalid_response(&request_url, e.to_string()))?;

        let mut entries: Vec<SheetProperties> =
            metadata.sheets.into_iter().map(|s| s.properties).collect();
        entries.sort_by_key(|p| p.index);
        let sheets = entries
            .into_iter()
            .map(|p| SheetHandle::new(p.title, p.sheet_id))
            .collect::<Vec<_>>();

        debug!(
            id = %metadata.spreadsheet_id,
            sheets = sheets.len(),
            "spreadsheet metadata loaded"
        );

        Ok(SpreadsheetDocument {
            export_base_url: self.export_base_url(&metadata.spreadsheet_id),
            id: metadata.spreadsheet_id,
            name: metadata.properties.title,
            sheets,
        })
    }
}

#[async_trait]
impl ExportFetcher for SheetsApiClient {
    #[instrument(skip(self, token), fields(url = %url))]
    async fn fetch(&self, url: &str, token: &str) -> Result<Vec<u8>, PlatformError> {
        let response = self.get(url, token).await?;

        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.to_ascii_lowercase().contains("text/html"));
        if is_html {
            let final_url = response.url().as_str().to_ascii_lowercase();
            if LOGIN_PATTERNS.iter().any(|p| final_url.contains(p)) {
                debug!(final_url = %final_url, "export redirected to sign-in page");
                return Err(PlatformError::auth_required(url, 0, self.tokens.describe()));
            }
            return Err(PlatformError::invalid_response(
                url,
                "received an HTML page instead of the exported document",
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PlatformError::from_transport(url, e))?;
        info!(bytes = body.len(), "export fetched");
        Ok(body.to_vec())
    }
}

/// Extracts the document id from a spreadsheet URL.
///
/// Accepts `.../spreadsheets/d/<id>/...` URLs and bare ids.
///
/// # Errors
///
/// Returns [`PlatformError::InvalidUrl`] when no id can be found.
pub fn extract_spreadsheet_id(input: &str) -> Result<String, PlatformError> {
    let trimmed = input.trim();
    let Ok(parsed) = Url::parse(trimmed) else {
        if !trimmed.is_empty()
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        {
            return Ok(trimmed.to_string());
        }
        return Err(PlatformError::invalid_url(
            input,
            "not a URL or spreadsheet id",
        ));
    };

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(Iterator::collect)
        .unwrap_or_default();
    segments
        .windows(3)
        .find(|w| w[0] == "spreadsheets" && w[1] == "d" && !w[2].is_empty())
        .map(|w| w[2].to_string())
        .ok_or_else(|| PlatformError::invalid_url(input, "expected a /spreadsheets/d/<id> path"))
}

/// Metadata endpoint for `id`, restricted to the fields the exporter reads.
fn metadata_url(api_base_url: &str, id: &str) -> Result<String, PlatformError> {
    let raw = format!("{api_base_url}/v4/spreadsheets/{id}");
    let mut url = Url::parse(&raw).map_err(|e| PlatformError::invalid_url(&raw, e.to_string()))?;
    url.query_pairs_mut().append_pair("fields", METADATA_FIELDS);
    Ok(url.into())
}

fn trim_base(base: String) -> String {
    base.trim_end_matches('/').to_string()
}
