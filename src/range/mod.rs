//! `A1`-style range notation parsing.
//!
//! Converts spreadsheet addresses such as `B12` or `A1:C10` into 1-based
//! row/column boundaries. The export module turns these into the zero-based
//! start / exclusive end coordinates the export endpoint expects.
//!
//! # Example
//!
//! ```
//! use sheets_export::range::{parse_range, RangeBounds};
//!
//! let bounds = parse_range("A1:C10").unwrap();
//! assert_eq!(bounds, RangeBounds { r1: 1, c1: 1, r2: 10, c2: 3 });
//! ```
//!
//! A range whose first corner lies after its second (e.g. `C10:A1`) is
//! returned as written. Corners are never swapped.

mod error;

pub use error::RangeError;

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// Column letters followed by row digits, e.g. `AA12`.
#[allow(clippy::expect_used)]
static CELL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]+)([0-9]+)$").expect("cell address regex is valid") // Static pattern, safe to panic
});

/// A resolved cell address. Both coordinates are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAddress {
    /// Column number (`A` = 1).
    pub column: u32,
    /// Row number (first row = 1).
    pub row: u32,
}

/// Rectangle bounds parsed from range notation, all 1-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeBounds {
    /// First row.
    pub r1: u32,
    /// First column.
    pub c1: u32,
    /// Last row.
    pub r2: u32,
    /// Last column.
    pub c2: u32,
}

impl RangeBounds {
    /// Builds bounds spanning two corner addresses, in the order given.
    #[must_use]
    pub fn from_corners(start: CellAddress, end: CellAddress) -> Self {
        Self {
            r1: start.row,
            c1: start.column,
            r2: end.row,
            c2: end.column,
        }
    }

    /// Returns true when the start corner is not after the end corner on either axis.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.r1 <= self.r2 && self.c1 <= self.c2
    }
}

/// Converts column letters to a 1-based column number (`A` = 1, `AA` = 27).
///
/// Lowercase letters are normalized to uppercase first.
///
/// # Errors
///
/// Returns [`RangeError::InvalidFormat`] for empty input, characters outside
/// `A`-`Z`, or a column number that does not fit in `u32`.
pub fn parse_column_letters(letters: &str) -> Result<u32, RangeError> {
    if letters.is_empty() {
        return Err(RangeError::invalid_column(letters, "no column letters"));
    }

    let mut number: u32 = 0;
    for ch in letters.chars() {
        let upper = ch.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return Err(RangeError::invalid_column(
                letters,
                &format!("'{ch}' is not a column letter"),
            ));
        }
        let value = u32::from(upper as u8 - b'A' + 1);
        number = number
            .checked_mul(26)
            .and_then(|n| n.checked_add(value))
            .ok_or_else(|| RangeError::invalid_column(letters, "column number overflows"))?;
    }

    Ok(number)
}

/// Parses a single cell address such as `B12`.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`RangeError::InvalidFormat`] when the address is not letters
/// followed by digits, or the row is zero.
pub fn parse_cell_address(cell: &str) -> Result<CellAddress, RangeError> {
    let trimmed = cell.trim();
    let caps = CELL_PATTERN
        .captures(trimmed)
        .ok_or_else(|| RangeError::malformed_cell(cell))?;

    let column = parse_column_letters(&caps[1])?;
    let row: u32 = caps[2]
        .parse()
        .map_err(|_| RangeError::invalid_row(cell))?;
    if row == 0 {
        return Err(RangeError::invalid_row(cell));
    }

    trace!(cell = trimmed, column, row, "parsed cell address");
    Ok(CellAddress { column, row })
}

/// Parses `A1` or `A1:C10` notation into [`RangeBounds`].
///
/// A single cell yields identical start and end corners.
///
/// # Errors
///
/// Returns [`RangeError::InvalidFormat`] if either corner is malformed or
/// the notation contains more than one `:`.
pub fn parse_range(notation: &str) -> Result<RangeBounds, RangeError> {
    let mut parts = notation.split(':');
    let first = parts.next().unwrap_or_default();
    let second = parts.next();
    if parts.next().is_some() {
        return Err(RangeError::too_many_corners(notation));
    }

    let start = parse_cell_address(first)?;
    let end = match second {
        Some(cell) => parse_cell_address(cell)?,
        None => start,
    };

    Ok(RangeBounds::from_corners(start, end))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letters_map_to_one_through_twenty_six() {
        for (i, ch) in ('A'..='Z').enumerate() {
            let expected = u32::try_from(i).unwrap() + 1;
            assert_eq!(parse_column_letters(&ch.to_string()).unwrap(), expected);
        }
    }

    #[test]
    fn test_multi_letter_columns() {
        assert_eq!(parse_column_letters("AA").unwrap(), 27);
        assert_eq!(parse_column_letters("AZ").unwrap(), 52);
        assert_eq!(parse_column_letters("BA").unwrap(), 53);
        assert_eq!(parse_column_letters("ZZ").unwrap(), 702);
        assert_eq!(parse_column_letters("AAA").unwrap(), 703);
    }

    #[test]
    fn test_lowercase_letters_are_normalized() {
        assert_eq!(parse_column_letters("aa").unwrap(), 27);
        assert_eq!(parse_column_letters("bA").unwrap(), 53);
    }

    #[test]
    fn test_column_letters_reject_non_letters() {
        assert!(matches!(
            parse_column_letters("A1"),
            Err(RangeError::InvalidFormat { .. })
        ));
        assert!(parse_column_letters("").is_err());
        assert!(parse_column_letters("Ä").is_err());
    }

    #[test]
    fn test_column_letters_overflow_is_an_error() {
        assert!(parse_column_letters(&"Z".repeat(10)).is_err());
    }

    #[test]
    fn test_parse_cell_address() {
        assert_eq!(
            parse_cell_address("B12").unwrap(),
            CellAddress { column: 2, row: 12 }
        );
        assert_eq!(
            parse_cell_address("AA1").unwrap(),
            CellAddress { column: 27, row: 1 }
        );
        assert_eq!(
            parse_cell_address(" c3 ").unwrap(),
            CellAddress { column: 3, row: 3 }
        );
    }

    #[test]
    fn test_parse_cell_address_rejects_bad_shapes() {
        for bad in ["12B", "B", "12", "", "B1C", "$B$1", "B-1"] {
            assert!(
                matches!(parse_cell_address(bad), Err(RangeError::InvalidFormat { .. })),
                "expected InvalidFormat for {bad:?}"
            );
        }
    }

    #[test]
    fn test_parse_cell_address_rejects_row_zero() {
        assert!(parse_cell_address("A0").is_err());
    }

    #[test]
    fn test_parse_range_single_cell() {
        assert_eq!(
            parse_range("B2").unwrap(),
            RangeBounds { r1: 2, c1: 2, r2: 2, c2: 2 }
        );
    }

    #[test]
    fn test_parse_range_two_corners() {
        assert_eq!(
            parse_range("A1:C10").unwrap(),
            RangeBounds { r1: 1, c1: 1, r2: 10, c2: 3 }
        );
    }

    #[test]
    fn test_parse_range_keeps_reversed_corners() {
        let bounds = parse_range("C10:A1").unwrap();
        assert_eq!(bounds, RangeBounds { r1: 10, c1: 3, r2: 1, c2: 1 });
        assert!(!bounds.is_ordered());
    }

    #[test]
    fn test_parse_range_errors() {
        assert!(parse_range("A1:B2:C3").is_err());
        assert!(parse_range("A1:").is_err());
        assert!(parse_range(":B2").is_err());
        assert!(parse_range("").is_err());
    }
}
