//! Range notation tests through the public API.

use sheets_export::{
    CellAddress, ExportError, ExportRangeMode, RangeBounds, RangeError, SheetsExporter,
    SpreadsheetDocument, parse_cell_address, parse_range,
};
use sheets_export::platform::SheetHandle;

fn document() -> SpreadsheetDocument {
    SpreadsheetDocument {
        id: "doc".to_string(),
        name: "Ledger".to_string(),
        export_base_url: "https://docs.example.com/spreadsheets/d/doc/export".to_string(),
        sheets: vec![SheetHandle::new("Data", 5)],
    }
}

#[test]
fn test_cell_addresses_resolve_to_one_based_coordinates() {
    let cases = [
        ("A1", 1, 1),
        ("Z9", 26, 9),
        ("AA1", 27, 1),
        ("AZ3", 52, 3),
        ("BA100", 53, 100),
        ("b12", 2, 12),
    ];
    for (cell, column, row) in cases {
        assert_eq!(
            parse_cell_address(cell).unwrap(),
            CellAddress { column, row },
            "{cell}"
        );
    }
}

#[test]
fn test_range_bounds_follow_corner_order() {
    assert_eq!(
        parse_range("A1:C10").unwrap(),
        RangeBounds {
            r1: 1,
            c1: 1,
            r2: 10,
            c2: 3
        }
    );

    let reversed = parse_range("C10:A1").unwrap();
    assert_eq!((reversed.r1, reversed.c1), (10, 3));
    assert!(!reversed.is_ordered());
}

#[test]
fn test_malformed_notation_reports_suggestion() {
    for notation in ["", "A", "12", "A0", "A1:B2:C3", "A-1", "1A"] {
        let err = parse_range(notation).unwrap_err();
        let RangeError::InvalidFormat { suggestion, .. } = &err;
        assert!(!suggestion.is_empty(), "{notation}");
        assert!(err.to_string().contains("Suggestion:"), "{notation}");
    }
}

#[test]
fn test_exporter_surfaces_range_errors_as_invalid_format() {
    let mut exporter = SheetsExporter::new();
    exporter
        .set_export_range(ExportRangeMode::Range, Some("Data".into()), Some("A1:??"))
        .unwrap();

    let err = exporter.prepare(&document()).unwrap_err();
    assert!(matches!(err, ExportError::InvalidFormat(_)), "{err:?}");
}

#[test]
fn test_exporter_range_offsets_start_corner_only() {
    let mut exporter = SheetsExporter::new();
    exporter
        .set_export_range(ExportRangeMode::Range, Some("Data".into()), Some("C3:E7"))
        .unwrap();
    exporter.prepare(&document()).unwrap();

    let url = exporter.export_url(&document());
    assert!(
        url.ends_with("&gid=5&ir=false&ic=false&r1=2&c1=2&r2=7&c2=5"),
        "{url}"
    );
}
