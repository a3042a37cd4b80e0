//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use sheets_export::{ExportFormat, PageSize, ScaleMode};

/// Export a spreadsheet, one of its sheets, or a cell range to PDF, XLSX, CSV and more.
///
/// The access token is read from $SHEETS_EXPORT_ACCESS_TOKEN unless
/// `token_env` is set in the config file.
#[derive(Parser, Debug)]
#[command(name = "sheets-export")]
#[command(author, version, about)]
#[command(group(ArgGroup::new("sheet_target").args(["sheet", "sheet_index"])))]
pub struct Args {
    /// Spreadsheet URL (or bare document id)
    pub url: String,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format: pdf, xlsx, ods, csv, tsv, zip
    #[arg(short, long)]
    pub format: Option<ExportFormat>,

    /// Paper size: letter, tabloid, legal, statement, executive, folio, a3, a4, a5, b4, b5
    #[arg(short, long)]
    pub size: Option<PageSize>,

    /// Landscape orientation (default is portrait)
    #[arg(long)]
    pub landscape: bool,

    /// Scale: normal, fit-to-width, fit-to-height, fit-to-page
    #[arg(long)]
    pub scale: Option<ScaleMode>,

    /// Top margin in inches
    #[arg(long)]
    pub top_margin: Option<f64>,

    /// Bottom margin in inches
    #[arg(long)]
    pub bottom_margin: Option<f64>,

    /// Left margin in inches
    #[arg(long)]
    pub left_margin: Option<f64>,

    /// Right margin in inches
    #[arg(long)]
    pub right_margin: Option<f64>,

    /// Print gridlines
    #[arg(long)]
    pub gridlines: bool,

    /// Print the document title
    #[arg(long)]
    pub print_title: bool,

    /// Print cell notes
    #[arg(long)]
    pub print_notes: bool,

    /// Repeat frozen rows on every page
    #[arg(long)]
    pub repeat_row_headers: bool,

    /// Export only the sheet with this name
    #[arg(long)]
    pub sheet: Option<String>,

    /// Export only the sheet at this zero-based position
    #[arg(long)]
    pub sheet_index: Option<usize>,

    /// Export only this cell range of the selected sheet, e.g. A1:C10
    #[arg(short, long, requires = "sheet_target")]
    pub range: Option<String>,

    /// Directory to write the exported file to (default: current directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Print the export URL without fetching it
    #[arg(long)]
    pub dry_run: bool,
}
