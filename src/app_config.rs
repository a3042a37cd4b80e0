//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use sheets_export::{ExportFormat, Orientation, PageSize, ScaleMode};

/// TOML-backed file configuration for export defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileConfig {
    /// Default output directory for exported files.
    pub output_dir: Option<PathBuf>,
    /// Default export format.
    pub format: Option<ExportFormat>,
    /// Default paper size.
    pub size: Option<PageSize>,
    /// Default page orientation.
    pub orientation: Option<Orientation>,
    /// Default scale mode.
    pub scale: Option<ScaleMode>,
    pub top_margin: Option<f64>,
    pub bottom_margin: Option<f64>,
    pub left_margin: Option<f64>,
    pub right_margin: Option<f64>,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// HTTP read timeout in seconds.
    pub read_timeout_secs: Option<u64>,
    /// Override for the spreadsheet metadata API host.
    pub api_base_url: Option<String>,
    /// Override for the document export host.
    pub docs_base_url: Option<String>,
    /// Environment variable holding the access token.
    pub token_env: Option<String>,
}

impl FileConfig {
    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        for (field, value) in [
            ("top_margin", self.top_margin),
            ("bottom_margin", self.bottom_margin),
            ("left_margin", self.left_margin),
            ("right_margin", self.right_margin),
        ] {
            validate_margin(field, value)?;
        }
        for (field, value) in [
            ("api_base_url", self.api_base_url.as_deref()),
            ("docs_base_url", self.docs_base_url.as_deref()),
        ] {
            if let Some(url) = value
                && url::Url::parse(url).is_err()
            {
                bail!("Invalid config value for `{field}`: '{url}' is not an absolute URL");
            }
        }
        if let Some(var) = self.token_env.as_deref()
            && var.trim().is_empty()
        {
            bail!("Invalid config value for `token_env`: must not be empty");
        }
        Ok(())
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

pub(crate) fn validate_margin(field: &str, value: Option<f64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !value.is_finite() || !(0.0..=10.0).contains(&value) {
        bail!("Invalid value for `{field}`: {value}. Expected inches in 0.0..=10.0");
    }
    Ok(())
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/sheets-export/config.toml`
/// 2. `$HOME/.config/sheets-export/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("sheets-export")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("sheets-export")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(path_ref) if path_ref.exists() => Some(load_file_config(path_ref)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!(
                "Invalid config syntax on line {}: expected key = value",
                line_index + 1
            );
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let line_no = line_index + 1;

        match key {
            "output_dir" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `output_dir` value on line {line_no}"))?;
                cfg.output_dir = Some(PathBuf::from(parsed));
            }
            "format" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `format` value on line {line_no}"))?;
                cfg.format = Some(
                    parsed
                        .parse()
                        .with_context(|| format!("Invalid `format` value on line {line_no}"))?,
                );
            }
            "size" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `size` value on line {line_no}"))?;
                cfg.size = Some(
                    parsed
                        .parse()
                        .with_context(|| format!("Invalid `size` value on line {line_no}"))?,
                );
            }
            "orientation" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `orientation` value on line {line_no}"))?;
                cfg.orientation = Some(
                    parsed
                        .parse()
                        .with_context(|| format!("Invalid `orientation` value on line {line_no}"))?,
                );
            }
            "scale" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `scale` value on line {line_no}"))?;
                cfg.scale = Some(
                    parsed
                        .parse()
                        .with_context(|| format!("Invalid `scale` value on line {line_no}"))?,
                );
            }
            "top_margin" | "bottom_margin" | "left_margin" | "right_margin" => {
                let parsed = parse_float(value)
                    .with_context(|| format!("Invalid `{key}` value on line {line_no}"))?;
                let slot = match key {
                    "top_margin" => &mut cfg.top_margin,
                    "bottom_margin" => &mut cfg.bottom_margin,
                    "left_margin" => &mut cfg.left_margin,
                    _ => &mut cfg.right_margin,
                };
                *slot = Some(parsed);
            }
            "connect_timeout_secs" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!("Invalid `connect_timeout_secs` value on line {line_no}")
                })?;
                cfg.connect_timeout_secs = Some(parsed);
            }
            "read_timeout_secs" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!("Invalid `read_timeout_secs` value on line {line_no}")
                })?;
                cfg.read_timeout_secs = Some(parsed);
            }
            "api_base_url" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `api_base_url` value on line {line_no}"))?;
                cfg.api_base_url = Some(parsed);
            }
            "docs_base_url" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `docs_base_url` value on line {line_no}"))?;
                cfg.docs_base_url = Some(parsed);
            }
            "token_env" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `token_env` value on line {line_no}"))?;
                cfg.token_env = Some(parsed);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}

fn parse_float(raw_value: &str) -> Result<f64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected numeric value");
    }
    Ok(token.parse::<f64>()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_partial_fields() {
        let cfg = parse_config_str(
            r#"
format = "xlsx"   # spreadsheets for the finance team
top_margin = 0.25
"#,
        )
        .expect("partial config should parse");
        assert_eq!(cfg.format, Some(ExportFormat::Xlsx));
        assert_eq!(cfg.top_margin, Some(0.25));
        assert!(cfg.output_dir.is_none());
        assert!(cfg.size.is_none());
    }

    #[test]
    fn test_parse_config_all_fields() {
        let cfg = parse_config_str(
            r#"
output_dir = "/tmp/exports"
format = "pdf"
size = "letter"
orientation = "landscape"
scale = "fit-to-width"
top_margin = 1
bottom_margin = 0.5
left_margin = 0.75
right_margin = 0.75
connect_timeout_secs = 10
read_timeout_secs = 120
api_base_url = "http://127.0.0.1:8080"
docs_base_url = "http://127.0.0.1:8081"
token_env = "MY_TOKEN"
"#,
        )
        .expect("full config should parse");
        assert_eq!(cfg.output_dir, Some(PathBuf::from("/tmp/exports")));
        assert_eq!(cfg.size, Some(PageSize::Letter));
        assert_eq!(cfg.orientation, Some(Orientation::Landscape));
        assert_eq!(cfg.scale, Some(ScaleMode::FitToWidth));
        assert_eq!(cfg.top_margin, Some(1.0));
        assert_eq!(cfg.read_timeout_secs, Some(120));
        assert_eq!(cfg.token_env.as_deref(), Some("MY_TOKEN"));
    }

    #[test]
    fn test_parse_config_rejects_unknown_format() {
        let err = parse_config_str(r#"format = "docx""#).expect_err("docx is not exportable");
        assert!(format!("{err:#}").contains("format"), "{err:#}");
    }

    #[test]
    fn test_parse_config_rejects_unquoted_string() {
        let err = parse_config_str("format = pdf").expect_err("strings must be quoted");
        assert!(err.to_string().contains("format"));
    }

    #[test]
    fn test_parse_config_rejects_negative_margin() {
        let err = parse_config_str("left_margin = -1").expect_err("negative margin");
        assert!(err.to_string().contains("left_margin"), "{err}");
    }

    #[test]
    fn test_parse_config_rejects_zero_timeout() {
        let err = parse_config_str("read_timeout_secs = 0").expect_err("zero timeout");
        assert!(err.to_string().contains("read_timeout_secs"));
    }

    #[test]
    fn test_parse_config_rejects_unknown_key() {
        let err = parse_config_str("concurrency = 4").expect_err("unknown key");
        assert!(err.to_string().contains("Unknown configuration key"));
    }

    #[test]
    fn test_parse_config_rejects_relative_base_url() {
        let err = parse_config_str(r#"api_base_url = "sheets.local""#).expect_err("relative URL");
        assert!(err.to_string().contains("api_base_url"));
    }

    #[test]
    fn test_strip_inline_comment_keeps_hash_in_string() {
        assert_eq!(
            strip_inline_comment(r#"output_dir = "/tmp/#exports" # note"#).trim(),
            r#"output_dir = "/tmp/#exports""#
        );
    }

    #[test]
    fn test_parse_config_reports_line_number() {
        let err = parse_config_str("format = \"pdf\"\nnot a pair").expect_err("syntax error");
        assert!(err.to_string().contains("line 2"), "{err}");
    }
}
