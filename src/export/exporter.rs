//! The export settings builder and resolver.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use super::options::{ExportFormat, ExportOptions, OptionKey, Orientation, PageSize, ScaleMode};
use super::selector::{ExportRange, ExportRangeMode, SheetSelector};
use super::ExportError;
use crate::platform::{ExportServices, SpreadsheetDocument, StoredFile};
use crate::range::parse_range;

/// Fluent export configuration for one spreadsheet export.
///
/// Every builder owns its own copy of the default options, so configuring
/// one instance never affects another.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use sheets_export::export::{ExportFormat, ExportRangeMode, SheetsExporter};
/// use sheets_export::platform::{EnvTokenProvider, ExportServices, LocalFileStore, SheetsApiClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SheetsApiClient::new(Arc::new(EnvTokenProvider::default()))?;
/// let services = ExportServices::with_api_client(client, Arc::new(LocalFileStore::new("./exports")));
///
/// let mut exporter = SheetsExporter::new();
/// exporter
///     .set_format(ExportFormat::Pdf)
///     .set_margins(Some(0.25), None, None, None)
///     .set_export_range(ExportRangeMode::Range, Some("Q1".into()), Some("A1:F40"))?;
///
/// let file = exporter
///     .export_by_url("https://docs.google.com/spreadsheets/d/1AbC/edit", &services)
///     .await?;
/// println!("saved {}", file.path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SheetsExporter {
    options: ExportOptions,
    range: ExportRange,
    destination_folder: Option<PathBuf>,
}

impl SheetsExporter {
    /// Creates a builder with default options and whole-workbook export.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current option mapping.
    #[must_use]
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Current export range selection.
    #[must_use]
    pub fn export_range(&self) -> &ExportRange {
        &self.range
    }

    /// Folder the exported file is moved into, if set.
    #[must_use]
    pub fn destination_folder(&self) -> Option<&Path> {
        self.destination_folder.as_deref()
    }

    /// Output format of the current configuration.
    #[must_use]
    pub fn format(&self) -> ExportFormat {
        self.options
            .get(OptionKey::Format)
            .and_then(|v| v.to_string().parse().ok())
            .unwrap_or(ExportFormat::Pdf)
    }

    pub fn set_format(&mut self, format: ExportFormat) -> &mut Self {
        self.options.set(OptionKey::Format, format.as_str());
        self
    }

    pub fn set_size(&mut self, size: PageSize) -> &mut Self {
        self.options.set(OptionKey::Size, i64::from(size.code()));
        self
    }

    pub fn set_orientation(&mut self, orientation: Orientation) -> &mut Self {
        self.options.set(OptionKey::Orientation, orientation.as_str());
        self
    }

    pub fn set_scale(&mut self, scale: ScaleMode) -> &mut Self {
        self.options.set(OptionKey::Scale, scale.as_str());
        self
    }

    /// Sets page margins in inches. `None` keeps the margin's current value.
    pub fn set_margins(
        &mut self,
        top: Option<f64>,
        bottom: Option<f64>,
        left: Option<f64>,
        right: Option<f64>,
    ) -> &mut Self {
        for (key, value) in [
            (OptionKey::TopMargin, top),
            (OptionKey::BottomMargin, bottom),
            (OptionKey::LeftMargin, left),
            (OptionKey::RightMargin, right),
        ] {
            let current = self.options.margin(key);
            self.options.set(key, value.unwrap_or(current));
        }
        self
    }

    pub fn set_gridlines(&mut self, enabled: bool) -> &mut Self {
        self.options.set(OptionKey::Gridlines, enabled);
        self
    }

    pub fn set_print_title(&mut self, enabled: bool) -> &mut Self {
        self.options.set(OptionKey::PrintTitle, enabled);
        self
    }

    pub fn set_print_notes(&mut self, enabled: bool) -> &mut Self {
        self.options.set(OptionKey::PrintNotes, enabled);
        self
    }

    /// Repeats frozen rows at the top of every page.
    pub fn set_repeat_row_headers(&mut self, enabled: bool) -> &mut Self {
        self.options.set(OptionKey::RepeatRowHeaders, enabled);
        self
    }

    /// Moves exported files into `folder` instead of the file store's default location.
    pub fn set_destination_folder(&mut self, folder: Option<PathBuf>) -> &mut Self {
        self.destination_folder = folder;
        self
    }

    /// Selects what to export. Replaces any previous selection.
    ///
    /// - `Workbook`: `primary` and `secondary` are ignored.
    /// - `Sheet`: `primary` picks the sheet by name or zero-based index.
    /// - `Range`: as `Sheet`, plus `secondary` holds `A1` notation, stored as given
    ///   and parsed at export time.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidArgument`] when a required argument is missing.
    pub fn set_export_range(
        &mut self,
        mode: ExportRangeMode,
        primary: Option<SheetSelector>,
        secondary: Option<&str>,
    ) -> Result<&mut Self, ExportError> {
        self.range = ExportRange::from_parts(mode, primary, secondary)?;
        debug!(range = ?self.range, "export range set");
        Ok(self)
    }

    /// Finalizes the option keys for `document` without any I/O.
    ///
    /// Range keys from a previous pass are always removed first.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NotFound`] if the selected sheet is missing and
    /// [`ExportError::InvalidFormat`] if the range notation is malformed.
    pub fn prepare(&mut self, document: &SpreadsheetDocument) -> Result<(), ExportError> {
        for key in OptionKey::RANGE_KEYS {
            self.options.remove(key);
        }

        let Some(selector) = self.range.sheet() else {
            return Ok(());
        };
        let sheet = selector.find(document).ok_or_else(|| {
            ExportError::sheet_not_found(
                selector,
                &document.name,
                document.sheets.iter().map(|s| s.name.as_str()),
            )
        })?;
        self.options.set(OptionKey::SheetId, sheet.sheet_id);

        if let ExportRange::Range { notation, .. } = &self.range {
            let bounds = parse_range(notation)?;
            if !bounds.is_ordered() {
                debug!(notation = %notation, "range start lies after its end; passing through unchanged");
            }
            self.options
                .set(OptionKey::IncludeRow, false)
                .set(OptionKey::IncludeColumn, false)
                .set(OptionKey::R1, bounds.r1 - 1)
                .set(OptionKey::C1, bounds.c1 - 1)
                .set(OptionKey::R2, bounds.r2)
                .set(OptionKey::C2, bounds.c2);
        }

        Ok(())
    }

    /// Export request URL for `document` using the current options.
    #[must_use]
    pub fn export_url(&self, document: &SpreadsheetDocument) -> String {
        format!(
            "{}?{}",
            document.export_base_url,
            self.options.to_query_string()
        )
    }

    /// File name for the export of `document`.
    #[must_use]
    pub fn file_name(&self, document: &SpreadsheetDocument) -> String {
        format!("{}.{}", document.name, self.format().extension())
    }

    /// Prepares, fetches and stores the export of `document`.
    ///
    /// # Errors
    ///
    /// Returns resolution errors from [`prepare`](Self::prepare) and any
    /// [`ExportError::Platform`] failure from the collaborators.
    #[instrument(skip(self, document, services), fields(document = %document.id, mode = ?self.range.mode()))]
    pub async fn resolve(
        &mut self,
        document: &SpreadsheetDocument,
        services: &ExportServices,
    ) -> Result<StoredFile, ExportError> {
        self.prepare(document)?;
        let url = self.export_url(document);
        debug!(url = %url, "export URL built");

        let token = services.tokens.access_token().await?;
        let payload = services.fetcher.fetch(&url, &token).await?;
        let file = services
            .files
            .create_file(&payload, &self.file_name(document), self.destination_folder())
            .await?;

        info!(
            document = %document.name,
            path = %file.path().display(),
            bytes = file.size(),
            "spreadsheet exported"
        );
        Ok(file)
    }

    /// Exports an already opened document.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub async fn export_by_spreadsheet(
        &mut self,
        document: &SpreadsheetDocument,
        services: &ExportServices,
    ) -> Result<StoredFile, ExportError> {
        self.resolve(document, services).await
    }

    /// Opens the document at `url` and exports it.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Platform`] if the document cannot be opened,
    /// plus everything [`resolve`](Self::resolve) can return.
    pub async fn export_by_url(
        &mut self,
        url: &str,
        services: &ExportServices,
    ) -> Result<StoredFile, ExportError> {
        let document = services.documents.open_by_url(url).await?;
        self.export_by_spreadsheet(&document, services).await
    }
}
