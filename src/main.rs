//! CLI entry point for the spreadsheet exporter.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use sheets_export::export::ExportRangeMode;
use sheets_export::platform::{CONNECT_TIMEOUT_SECS, DEFAULT_TOKEN_ENV, READ_TIMEOUT_SECS};
use sheets_export::{
    EnvTokenProvider, ExportServices, LocalFileStore, Orientation, SheetSelector, SheetsApiClient,
    SheetsExporter,
};
use tracing::{debug, info};

mod app_config;
mod cli;

use app_config::{FileConfig, load_default_file_config, validate_margin};
use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let loaded = load_default_file_config()?;
    if let Some(path) = loaded.path.as_deref() {
        debug!(path = %path.display(), loaded = loaded.config.is_some(), "config file resolved");
    }
    let file_config = loaded.config.unwrap_or_default();

    let exporter = build_exporter(&args, &file_config)?;
    let services = build_services(&args, &file_config)?;

    run(&args, exporter, &services).await
}

/// Applies file config defaults, then CLI overrides.
fn build_exporter(args: &Args, config: &FileConfig) -> Result<SheetsExporter> {
    for (field, value) in [
        ("top-margin", args.top_margin),
        ("bottom-margin", args.bottom_margin),
        ("left-margin", args.left_margin),
        ("right-margin", args.right_margin),
    ] {
        validate_margin(field, value)?;
    }

    let mut exporter = SheetsExporter::new();

    if let Some(format) = args.format.or(config.format) {
        exporter.set_format(format);
    }
    if let Some(size) = args.size.or(config.size) {
        exporter.set_size(size);
    }
    let orientation = if args.landscape {
        Some(Orientation::Landscape)
    } else {
        config.orientation
    };
    if let Some(orientation) = orientation {
        exporter.set_orientation(orientation);
    }
    if let Some(scale) = args.scale.or(config.scale) {
        exporter.set_scale(scale);
    }
    exporter
        .set_margins(
            config.top_margin,
            config.bottom_margin,
            config.left_margin,
            config.right_margin,
        )
        .set_margins(
            args.top_margin,
            args.bottom_margin,
            args.left_margin,
            args.right_margin,
        )
        .set_gridlines(args.gridlines)
        .set_print_title(args.print_title)
        .set_print_notes(args.print_notes)
        .set_repeat_row_headers(args.repeat_row_headers);

    let sheet = match (&args.sheet, args.sheet_index) {
        (Some(name), _) => Some(SheetSelector::ByName(name.clone())),
        (None, Some(index)) => Some(SheetSelector::ByIndex(index)),
        (None, None) => None,
    };
    let mode = match (&sheet, &args.range) {
        (None, _) => ExportRangeMode::Workbook,
        (Some(_), None) => ExportRangeMode::Sheet,
        (Some(_), Some(_)) => ExportRangeMode::Range,
    };
    exporter.set_export_range(mode, sheet, args.range.as_deref())?;

    Ok(exporter)
}

fn build_services(args: &Args, config: &FileConfig) -> Result<ExportServices> {
    let token_env = config
        .token_env
        .clone()
        .unwrap_or_else(|| DEFAULT_TOKEN_ENV.to_string());
    let tokens = Arc::new(EnvTokenProvider::new(token_env));

    let mut client = SheetsApiClient::with_timeouts(
        tokens,
        config.connect_timeout_secs.unwrap_or(CONNECT_TIMEOUT_SECS),
        config.read_timeout_secs.unwrap_or(READ_TIMEOUT_SECS),
    )
    .context("Failed to initialize HTTP client")?;
    if let Some(base) = config.api_base_url.as_deref() {
        client = client.with_api_base_url(base);
    }
    if let Some(base) = config.docs_base_url.as_deref() {
        client = client.with_docs_base_url(base);
    }

    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    debug!(output_dir = %output_dir.display(), "file store configured");

    Ok(ExportServices::with_api_client(
        client,
        Arc::new(LocalFileStore::new(output_dir)),
    ))
}

async fn run(args: &Args, mut exporter: SheetsExporter, services: &ExportServices) -> Result<()> {
    if args.dry_run {
        let document = services
            .documents
            .open_by_url(&args.url)
            .await
            .with_context(|| format!("Failed to open spreadsheet '{}'", args.url))?;
        exporter.prepare(&document)?;
        println!("{}", exporter.export_url(&document));
        return Ok(());
    }

    info!(url = %args.url, "exporting spreadsheet");
    let file = exporter
        .export_by_url(&args.url, services)
        .await
        .with_context(|| format!("Failed to export '{}'", args.url))?;
    println!("{}", file.path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheets_export::export::{OptionKey, OptionValue};
    use sheets_export::{ExportFormat, ExportRange, PageSize};

    const URL: &str = "https://docs.google.com/spreadsheets/d/abc/edit";

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["sheets-export", URL];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_cli_overrides_file_config() {
        let config = FileConfig {
            format: Some(ExportFormat::Csv),
            size: Some(PageSize::Legal),
            top_margin: Some(2.0),
            ..FileConfig::default()
        };
        let exporter = build_exporter(&args(&["--format", "xlsx", "--top-margin", "1"]), &config)
            .unwrap();
        assert_eq!(exporter.format(), ExportFormat::Xlsx);
        assert_eq!(
            exporter.options().get(OptionKey::Size),
            Some(&OptionValue::Integer(2))
        );
        assert!((exporter.options().margin(OptionKey::TopMargin) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_file_margins_apply_when_flags_absent() {
        let config = FileConfig {
            left_margin: Some(0.75),
            ..FileConfig::default()
        };
        let exporter = build_exporter(&args(&[]), &config).unwrap();
        assert!((exporter.options().margin(OptionKey::LeftMargin) - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sheet_flags_select_export_range() {
        let exporter = build_exporter(&args(&[]), &FileConfig::default()).unwrap();
        assert_eq!(exporter.export_range(), &ExportRange::Workbook);

        let exporter =
            build_exporter(&args(&["--sheet", "Q1"]), &FileConfig::default()).unwrap();
        assert_eq!(
            exporter.export_range(),
            &ExportRange::Sheet(SheetSelector::ByName("Q1".to_string()))
        );

        let exporter = build_exporter(
            &args(&["--sheet-index", "3", "--range", "B2:D4"]),
            &FileConfig::default(),
        )
        .unwrap();
        assert_eq!(
            exporter.export_range(),
            &ExportRange::Range {
                sheet: SheetSelector::ByIndex(3),
                notation: "B2:D4".to_string()
            }
        );
    }

    #[test]
    fn test_landscape_flag_sets_orientation() {
        let exporter = build_exporter(&args(&["--landscape"]), &FileConfig::default()).unwrap();
        assert_eq!(
            exporter.options().get(OptionKey::Orientation),
            Some(&OptionValue::Text("false".to_string()))
        );
    }

    #[test]
    fn test_negative_margin_flag_rejected() {
        assert!(build_exporter(&args(&["--top-margin=-1"]), &FileConfig::default()).is_err());
    }
}
