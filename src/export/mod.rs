//! Export settings and resolution.
//!
//! [`SheetsExporter`] collects export options through a fluent interface and,
//! at export time, resolves the selected sheet / range against an opened
//! [`SpreadsheetDocument`](crate::platform::SpreadsheetDocument):
//!
//! 1. range keys (`gid`, `ir`, `ic`, `r1`, `c1`, `r2`, `c2`) from any earlier
//!    pass are removed
//! 2. for sheet or range export the sheet is looked up by name or index and
//!    its id stored under `gid`; range export also stores the boundaries
//! 3. the options are serialized onto the document's export URL
//! 4. the fetched bytes are handed to the file store

mod error;
mod exporter;
mod options;
mod selector;

pub use error::ExportError;
pub use exporter::SheetsExporter;
pub use options::{
    DEFAULT_MARGIN, ExportFormat, ExportOptions, OptionKey, OptionValue, Orientation, PageSize,
    ScaleMode,
};
pub use selector::{ExportRange, ExportRangeMode, SheetSelector};
