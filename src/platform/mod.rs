//! Collaborators on the hosted document platform side.
//!
//! The exporter never talks to the network or disk directly. It goes through
//! four narrow traits:
//!
//! - [`DocumentSource`] - opens a spreadsheet by URL and lists its sheets
//! - [`TokenProvider`] - supplies the short-lived bearer token
//! - [`ExportFetcher`] - performs the export request and returns the bytes
//! - [`FileStore`] - persists the exported bytes as a file
//!
//! Default implementations: [`SheetsApiClient`] (document lookup and fetch
//! over reqwest), [`EnvTokenProvider`] / [`StaticTokenProvider`] and
//! [`LocalFileStore`].

mod constants;
mod error;
mod http_client;
mod sheets_api;
mod storage;
mod token;

pub use constants::{
    CONNECT_TIMEOUT_SECS, DEFAULT_API_BASE_URL, DEFAULT_DOCS_BASE_URL, DEFAULT_TOKEN_ENV,
    READ_TIMEOUT_SECS,
};
pub use error::PlatformError;
pub use http_client::build_platform_http_client;
pub use sheets_api::{SheetsApiClient, extract_spreadsheet_id};
pub use storage::{LocalFileStore, StoredFile};
pub use token::{EnvTokenProvider, StaticTokenProvider};

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

/// One sheet (tab) of a spreadsheet document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetHandle {
    /// Display name of the sheet.
    pub name: String,
    /// Platform-specific numeric sheet id (the export `gid`).
    pub sheet_id: i64,
}

impl SheetHandle {
    /// Creates a sheet handle.
    #[must_use]
    pub fn new(name: impl Into<String>, sheet_id: i64) -> Self {
        Self {
            name: name.into(),
            sheet_id,
        }
    }
}

/// An opened spreadsheet document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetDocument {
    /// Platform document id.
    pub id: String,
    /// Display name; used as the exported file name.
    pub name: String,
    /// Export endpoint for this document, without query string.
    pub export_base_url: String,
    /// Sheets in display order.
    pub sheets: Vec<SheetHandle>,
}

impl SpreadsheetDocument {
    /// Finds a sheet by its exact display name.
    #[must_use]
    pub fn sheet_by_name(&self, name: &str) -> Option<&SheetHandle> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    /// Finds a sheet by its zero-based position.
    #[must_use]
    pub fn sheet_by_index(&self, index: usize) -> Option<&SheetHandle> {
        self.sheets.get(index)
    }
}

/// Opens spreadsheet documents.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Opens the document behind `url` and returns its metadata.
    async fn open_by_url(&self, url: &str) -> Result<SpreadsheetDocument, PlatformError>;
}

/// Supplies bearer tokens for platform requests.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns a currently valid access token.
    async fn access_token(&self) -> Result<String, PlatformError>;

    /// Short description of where the token comes from, for error messages.
    fn describe(&self) -> String;
}

/// Performs the export request.
#[async_trait]
pub trait ExportFetcher: Send + Sync {
    /// Fetches `url` with `Authorization: Bearer <token>` and returns the body.
    async fn fetch(&self, url: &str, token: &str) -> Result<Vec<u8>, PlatformError>;
}

/// Persists exported payloads.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Creates a file named `name` holding `payload`, optionally inside `folder`.
    async fn create_file(
        &self,
        payload: &[u8],
        name: &str,
        folder: Option<&Path>,
    ) -> Result<StoredFile, PlatformError>;
}

/// The collaborator set an export runs against.
#[derive(Clone)]
pub struct ExportServices {
    /// Document lookup.
    pub documents: Arc<dyn DocumentSource>,
    /// Token issuance.
    pub tokens: Arc<dyn TokenProvider>,
    /// Export transport.
    pub fetcher: Arc<dyn ExportFetcher>,
    /// Output storage.
    pub files: Arc<dyn FileStore>,
}

impl ExportServices {
    /// Bundles the four collaborators.
    #[must_use]
    pub fn new(
        documents: Arc<dyn DocumentSource>,
        tokens: Arc<dyn TokenProvider>,
        fetcher: Arc<dyn ExportFetcher>,
        files: Arc<dyn FileStore>,
    ) -> Self {
        Self {
            documents,
            tokens,
            fetcher,
            files,
        }
    }

    /// Wires a [`SheetsApiClient`] as document source and fetcher, sharing its token provider.
    #[must_use]
    pub fn with_api_client(client: SheetsApiClient, files: Arc<dyn FileStore>) -> Self {
        let tokens = client.tokens();
        let client = Arc::new(client);
        Self::new(client.clone(), tokens, client, files)
    }
}

impl std::fmt::Debug for ExportServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportServices")
            .field("tokens", &self.tokens.describe())
            .finish_non_exhaustive()
    }
}
