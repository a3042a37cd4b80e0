//! Spreadsheet export library.
//!
//! Builds export requests for a hosted spreadsheet platform: the whole
//! workbook, a single sheet, or a cell range, rendered as PDF, XLSX, ODS,
//! CSV, TSV or zipped HTML.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`export`] - Fluent export settings and the resolution pass
//! - [`range`] - `A1`-style range notation parsing
//! - [`platform`] - Document lookup, tokens, export fetch and file storage

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod export;
pub mod platform;
pub mod range;

mod user_agent;

// Re-export commonly used types
pub use export::{
    ExportError, ExportFormat, ExportRange, ExportRangeMode, Orientation, PageSize, ScaleMode,
    SheetSelector, SheetsExporter,
};
pub use platform::{
    EnvTokenProvider, ExportServices, LocalFileStore, PlatformError, SheetsApiClient,
    SpreadsheetDocument, StoredFile,
};
pub use range::{CellAddress, RangeBounds, RangeError, parse_cell_address, parse_range};
