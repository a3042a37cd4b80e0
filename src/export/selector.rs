//! Export range selection: whole workbook, one sheet, or a cell range.

use std::fmt;
use std::str::FromStr;

use super::ExportError;
use crate::platform::{SheetHandle, SpreadsheetDocument};

/// Which portion of the document to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportRangeMode {
    Sheet,
    Workbook,
    Range,
}

impl FromStr for ExportRangeMode {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sheet" | "0" => Ok(Self::Sheet),
            "workbook" | "1" => Ok(Self::Workbook),
            "range" | "2" => Ok(Self::Range),
            _ => Err(ExportError::invalid_argument(
                "mode",
                format!("unknown export range mode '{s}' (expected workbook, sheet or range)"),
            )),
        }
    }
}

/// Identifies a sheet by display name or zero-based position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SheetSelector {
    ByName(String),
    ByIndex(usize),
}

impl SheetSelector {
    /// Looks the sheet up in `document`.
    #[must_use]
    pub fn find<'a>(&self, document: &'a SpreadsheetDocument) -> Option<&'a SheetHandle> {
        match self {
            Self::ByName(name) => document.sheet_by_name(name),
            Self::ByIndex(index) => document.sheet_by_index(*index),
        }
    }
}

impl fmt::Display for SheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByName(name) => write!(f, "named \"{name}\""),
            Self::ByIndex(index) => write!(f, "at index {index}"),
        }
    }
}

impl From<&str> for SheetSelector {
    fn from(name: &str) -> Self {
        Self::ByName(name.to_string())
    }
}

impl From<String> for SheetSelector {
    fn from(name: String) -> Self {
        Self::ByName(name)
    }
}

impl From<usize> for SheetSelector {
    fn from(index: usize) -> Self {
        Self::ByIndex(index)
    }
}

/// The active export range. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExportRange {
    /// Every sheet.
    #[default]
    Workbook,
    /// A single sheet.
    Sheet(SheetSelector),
    /// A rectangle within one sheet, in raw `A1` notation.
    Range {
        sheet: SheetSelector,
        notation: String,
    },
}

impl ExportRange {
    /// The mode this selection belongs to.
    #[must_use]
    pub fn mode(&self) -> ExportRangeMode {
        match self {
            Self::Workbook => ExportRangeMode::Workbook,
            Self::Sheet(_) => ExportRangeMode::Sheet,
            Self::Range { .. } => ExportRangeMode::Range,
        }
    }

    /// The selected sheet, if any.
    #[must_use]
    pub fn sheet(&self) -> Option<&SheetSelector> {
        match self {
            Self::Workbook => None,
            Self::Sheet(sheet) | Self::Range { sheet, .. } => Some(sheet),
        }
    }

    /// Builds a selection from a mode and its arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidArgument`] when a sheet or range mode is
    /// missing its sheet selector, or range mode is missing its notation.
    pub fn from_parts(
        mode: ExportRangeMode,
        primary: Option<SheetSelector>,
        secondary: Option<&str>,
    ) -> Result<Self, ExportError> {
        match mode {
            ExportRangeMode::Workbook => Ok(Self::Workbook),
            ExportRangeMode::Sheet => {
                let sheet = primary.ok_or_else(|| {
                    ExportError::invalid_argument("primary", "sheet export needs a sheet name or index")
                })?;
                Ok(Self::Sheet(sheet))
            }
            ExportRangeMode::Range => {
                let sheet = primary.ok_or_else(|| {
                    ExportError::invalid_argument("primary", "range export needs a sheet name or index")
                })?;
                let notation = secondary.ok_or_else(|| {
                    ExportError::invalid_argument("secondary", "range export needs range notation such as A1:C10")
                })?;
                Ok(Self::Range {
                    sheet,
                    notation: notation.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn document() -> SpreadsheetDocument {
        SpreadsheetDocument {
            id: "abc".to_string(),
            name: "Budget".to_string(),
            export_base_url: "https://docs.example.com/spreadsheets/d/abc/export".to_string(),
            sheets: vec![SheetHandle::new("Summary", 0), SheetHandle::new("Sheet2", 98)],
        }
    }

    #[test]
    fn test_mode_from_str_accepts_names_and_codes() {
        assert_eq!("workbook".parse::<ExportRangeMode>().unwrap(), ExportRangeMode::Workbook);
        assert_eq!("0".parse::<ExportRangeMode>().unwrap(), ExportRangeMode::Sheet);
        assert_eq!("RANGE".parse::<ExportRangeMode>().unwrap(), ExportRangeMode::Range);
    }

    #[test]
    fn test_mode_from_str_rejects_unknown() {
        assert!(matches!(
            "3".parse::<ExportRangeMode>(),
            Err(ExportError::InvalidArgument { argument: "mode", .. })
        ));
    }

    #[test]
    fn test_selector_finds_by_name_and_index() {
        let doc = document();
        assert_eq!(SheetSelector::from("Sheet2").find(&doc).unwrap().sheet_id, 98);
        assert_eq!(SheetSelector::from(1_usize).find(&doc).unwrap().sheet_id, 98);
        assert!(SheetSelector::from(42_usize).find(&doc).is_none());
    }

    #[test]
    fn test_from_parts_requires_primary() {
        assert!(ExportRange::from_parts(ExportRangeMode::Sheet, None, None).is_err());
        assert!(ExportRange::from_parts(ExportRangeMode::Range, None, Some("A1")).is_err());
    }

    #[test]
    fn test_from_parts_range_requires_notation() {
        let err = ExportRange::from_parts(ExportRangeMode::Range, Some("Q1".into()), None)
            .unwrap_err();
        assert!(matches!(err, ExportError::InvalidArgument { argument: "secondary", .. }));
    }

    #[test]
    fn test_from_parts_workbook_ignores_arguments() {
        let range =
            ExportRange::from_parts(ExportRangeMode::Workbook, Some("Q1".into()), Some("A1"))
                .unwrap();
        assert_eq!(range, ExportRange::Workbook);
        assert!(range.sheet().is_none());
    }

    #[test]
    fn test_from_parts_range_stores_notation_verbatim() {
        let range =
            ExportRange::from_parts(ExportRangeMode::Range, Some(0_usize.into()), Some(" a1:c10"))
                .unwrap();
        assert_eq!(
            range,
            ExportRange::Range {
                sheet: SheetSelector::ByIndex(0),
                notation: " a1:c10".to_string()
            }
        );
        assert_eq!(range.mode(), ExportRangeMode::Range);
    }
}
