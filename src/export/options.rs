//! Export option keys, values and the ordered option mapping.
//!
//! The option mapping serializes to the export endpoint's query string in
//! insertion order, so [`ExportOptions::default`] fixes the order of the
//! leading parameters.

use std::fmt;
use std::str::FromStr;

use super::ExportError;

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Office Open XML workbook.
    Xlsx,
    /// OpenDocument spreadsheet.
    Ods,
    /// Zipped HTML.
    Zip,
    /// Comma-separated values (one sheet).
    Csv,
    /// Tab-separated values (one sheet).
    Tsv,
    /// Portable Document Format.
    Pdf,
}

impl ExportFormat {
    /// Value of the `format` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Ods => "ods",
            Self::Zip => "zip",
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Pdf => "pdf",
        }
    }

    /// File extension for exported files, without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" => Ok(Self::Xlsx),
            "ods" => Ok(Self::Ods),
            "zip" => Ok(Self::Zip),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "pdf" => Ok(Self::Pdf),
            other => Err(ExportError::invalid_argument(
                "format",
                format!("unknown format '{other}' (expected xlsx, ods, zip, csv, tsv or pdf)"),
            )),
        }
    }
}

/// Paper size, serialized as the platform's numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSize {
    Letter,
    Tabloid,
    Legal,
    Statement,
    Executive,
    Folio,
    A3,
    A4,
    A5,
    B4,
    B5,
}

impl PageSize {
    const ALL: [Self; 11] = [
        Self::Letter,
        Self::Tabloid,
        Self::Legal,
        Self::Statement,
        Self::Executive,
        Self::Folio,
        Self::A3,
        Self::A4,
        Self::A5,
        Self::B4,
        Self::B5,
    ];

    /// Value of the `size` query parameter.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Letter => 0,
            Self::Tabloid => 1,
            Self::Legal => 2,
            Self::Statement => 3,
            Self::Executive => 4,
            Self::Folio => 5,
            Self::A3 => 6,
            Self::A4 => 7,
            Self::A5 => 8,
            Self::B4 => 9,
            Self::B5 => 10,
        }
    }

    /// Lowercase display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Letter => "letter",
            Self::Tabloid => "tabloid",
            Self::Legal => "legal",
            Self::Statement => "statement",
            Self::Executive => "executive",
            Self::Folio => "folio",
            Self::A3 => "a3",
            Self::A4 => "a4",
            Self::A5 => "a5",
            Self::B4 => "b4",
            Self::B5 => "b5",
        }
    }
}

impl FromStr for PageSize {
    type Err = ExportError;

    /// Accepts a name (`a4`, `Letter`) or a numeric code (`7`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|size| size.name() == needle || size.code().to_string() == needle)
            .ok_or_else(|| {
                ExportError::invalid_argument("size", format!("unknown page size '{s}'"))
            })
    }
}

/// Page orientation, serialized into the `portrait` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Value of the `portrait` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "true",
            Self::Landscape => "false",
        }
    }
}

impl FromStr for Orientation {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" | "true" => Ok(Self::Portrait),
            "landscape" | "false" => Ok(Self::Landscape),
            other => Err(ExportError::invalid_argument(
                "orientation",
                format!("unknown orientation '{other}' (expected portrait or landscape)"),
            )),
        }
    }
}

/// How content is scaled onto the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleMode {
    /// 100%.
    Normal,
    FitToWidth,
    FitToHeight,
    FitToPage,
}

impl ScaleMode {
    /// Value of the `scale` query parameter (`"1"`-`"4"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "1",
            Self::FitToWidth => "2",
            Self::FitToHeight => "3",
            Self::FitToPage => "4",
        }
    }
}

impl FromStr for ScaleMode {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "normal" | "1" => Ok(Self::Normal),
            "fit-to-width" | "width" | "2" => Ok(Self::FitToWidth),
            "fit-to-height" | "height" | "3" => Ok(Self::FitToHeight),
            "fit-to-page" | "page" | "4" => Ok(Self::FitToPage),
            other => Err(ExportError::invalid_argument(
                "scale",
                format!(
                    "unknown scale '{other}' (expected normal, fit-to-width, fit-to-height or fit-to-page)"
                ),
            )),
        }
    }
}

/// Query parameter names understood by the export endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    Format,
    Size,
    /// Orientation flag (`portrait=true|false`).
    Orientation,
    Scale,
    TopMargin,
    BottomMargin,
    LeftMargin,
    RightMargin,
    /// Repeat frozen row headers on each page.
    RepeatRowHeaders,
    Gridlines,
    PrintTitle,
    PrintNotes,
    /// Numeric id of the exported sheet.
    SheetId,
    /// Include-row flag for range export.
    IncludeRow,
    /// Include-column flag for range export.
    IncludeColumn,
    /// Zero-based first row.
    R1,
    /// Zero-based first column.
    C1,
    /// Exclusive end row.
    R2,
    /// Exclusive end column.
    C2,
}

impl OptionKey {
    /// Keys added by sheet/range resolution, removed before every pass.
    pub const RANGE_KEYS: [Self; 7] = [
        Self::SheetId,
        Self::IncludeRow,
        Self::IncludeColumn,
        Self::R1,
        Self::C1,
        Self::R2,
        Self::C2,
    ];

    /// Query parameter name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Size => "size",
            Self::Orientation => "portrait",
            Self::Scale => "scale",
            Self::TopMargin => "top_margin",
            Self::BottomMargin => "bottom_margin",
            Self::LeftMargin => "left_margin",
            Self::RightMargin => "right_margin",
            Self::RepeatRowHeaders => "fzr",
            Self::Gridlines => "gridlines",
            Self::PrintTitle => "printtitle",
            Self::PrintNotes => "printnotes",
            Self::SheetId => "gid",
            Self::IncludeRow => "ir",
            Self::IncludeColumn => "ic",
            Self::R1 => "r1",
            Self::C1 => "c1",
            Self::R2 => "r2",
            Self::C2 => "c2",
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar option value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Default margin, in inches.
pub const DEFAULT_MARGIN: f64 = 0.5;

/// Ordered option mapping.
///
/// Setting an existing key replaces its value in place; removing a key and
/// setting it again appends it at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    entries: Vec<(OptionKey, OptionValue)>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        let mut options = Self::empty();
        options
            .set(OptionKey::Format, ExportFormat::Pdf.as_str())
            .set(OptionKey::Size, i64::from(PageSize::A4.code()))
            .set(OptionKey::Orientation, Orientation::Portrait.as_str())
            .set(OptionKey::Scale, ScaleMode::FitToPage.as_str())
            .set(OptionKey::TopMargin, DEFAULT_MARGIN)
            .set(OptionKey::BottomMargin, DEFAULT_MARGIN)
            .set(OptionKey::LeftMargin, DEFAULT_MARGIN)
            .set(OptionKey::RightMargin, DEFAULT_MARGIN)
            .set(OptionKey::RepeatRowHeaders, false)
            .set(OptionKey::Gridlines, false)
            .set(OptionKey::PrintTitle, false)
            .set(OptionKey::PrintNotes, false);
        options
    }
}

impl ExportOptions {
    /// An option mapping with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sets `key`, keeping its position if already present.
    pub fn set(&mut self, key: OptionKey, value: impl Into<OptionValue>) -> &mut Self {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: OptionKey) -> Option<OptionValue> {
        let pos = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Current value of `key`.
    #[must_use]
    pub fn get(&self, key: OptionKey) -> Option<&OptionValue> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Current value of a margin key, falling back to [`DEFAULT_MARGIN`].
    #[must_use]
    pub fn margin(&self, key: OptionKey) -> f64 {
        match self.get(key) {
            Some(OptionValue::Float(x)) => *x,
            #[allow(clippy::cast_precision_loss)]
            Some(OptionValue::Integer(n)) => *n as f64,
            _ => DEFAULT_MARGIN,
        }
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionKey, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// `k1=v1&k2=v2...` in insertion order.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}
