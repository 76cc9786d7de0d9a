//! Report theme configuration
//!
//! Colors and classification options are resolved upfront from TOML into
//! numeric RGB values so every later stage works with a fully validated,
//! immutable configuration.

use crate::error::ReportError;
use crate::types::Level;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Built-in theme used when no `--config` override is given.
const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Fully resolved report configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub report: ReportColors,
    pub levels: LevelColors,
    pub status: StatusColors,
    pub classification: Classification,
}

#[derive(Debug, Clone)]
pub struct ReportColors {
    pub header_font: u32,
    pub header_background: u32,
    pub sub_header_background: u32,
    pub default_font: u32,
    pub default_background: u32,
}

#[derive(Debug, Clone)]
pub struct LevelColors {
    pub minimal: u32,
    pub intermediary: u32,
    pub enhanced: u32,
    pub high: u32,
}

impl LevelColors {
    pub fn for_level(&self, level: Level) -> u32 {
        match level {
            Level::Minimal => self.minimal,
            Level::Intermediary => self.intermediary,
            Level::Enhanced => self.enhanced,
            Level::High => self.high,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusColors {
    pub success: u32,
    pub failed: u32,
    pub not_applicable: u32,
}

#[derive(Debug, Clone)]
pub struct Classification {
    pub font: u32,
    pub background: u32,
    pub options: Vec<String>,
}

/// Raw TOML shape, before color resolution.
#[derive(Debug, Deserialize)]
struct RawConfig {
    report_colors: RawReportColors,
    level_colors: RawLevelColors,
    status_colors: RawStatusColors,
    classification: RawClassification,
}

#[derive(Debug, Deserialize)]
struct RawReportColors {
    header_font_color: String,
    header_background_color: String,
    sub_header_background_color: String,
    default_font_color: String,
    default_background_color: String,
}

#[derive(Debug, Deserialize)]
struct RawLevelColors {
    minimal: String,
    intermediary: String,
    enhanced: String,
    high: String,
}

#[derive(Debug, Deserialize)]
struct RawStatusColors {
    success: String,
    failed: String,
    not_applicable: String,
}

#[derive(Debug, Deserialize)]
struct RawClassification {
    font_color: String,
    background_color: String,
    options: Vec<String>,
}

/// Load the configuration, falling back to the embedded default.
pub fn load_config(path: Option<&Path>) -> Result<Config, ReportError> {
    let content = match path {
        Some(path) => {
            debug!("Loading report configuration from {:?}", path);
            fs::read_to_string(path)?
        }
        None => DEFAULT_CONFIG.to_string(),
    };

    let raw: RawConfig =
        toml::from_str(&content).map_err(|source| ReportError::TomlParse { what: "configuration", source })?;

    Ok(Config {
        report: ReportColors {
            header_font: parse_color(&raw.report_colors.header_font_color)?,
            header_background: parse_color(&raw.report_colors.header_background_color)?,
            sub_header_background: parse_color(&raw.report_colors.sub_header_background_color)?,
            default_font: parse_color(&raw.report_colors.default_font_color)?,
            default_background: parse_color(&raw.report_colors.default_background_color)?,
        },
        levels: LevelColors {
            minimal: parse_color(&raw.level_colors.minimal)?,
            intermediary: parse_color(&raw.level_colors.intermediary)?,
            enhanced: parse_color(&raw.level_colors.enhanced)?,
            high: parse_color(&raw.level_colors.high)?,
        },
        status: StatusColors {
            success: parse_color(&raw.status_colors.success)?,
            failed: parse_color(&raw.status_colors.failed)?,
            not_applicable: parse_color(&raw.status_colors.not_applicable)?,
        },
        classification: Classification {
            font: parse_color(&raw.classification.font_color)?,
            background: parse_color(&raw.classification.background_color)?,
            options: raw.classification.options,
        },
    })
}

/// Parse "RRGGBB" or "#RRGGBB" into a numeric RGB value.
fn parse_color(value: &str) -> Result<u32, ReportError> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return Err(ReportError::InvalidColor(value.to_string()));
    }
    u32::from_str_radix(hex, 16).map_err(|_| ReportError::InvalidColor(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = load_config(None).unwrap();
        assert_eq!(config.levels.minimal, 0x00B050);
        assert_eq!(config.status.failed, 0xC00000);
        assert!(!config.classification.options.is_empty());
    }

    #[test]
    fn test_parse_color_accepts_leading_hash() {
        assert_eq!(parse_color("#0070C0").unwrap(), 0x0070C0);
        assert_eq!(parse_color("0070C0").unwrap(), 0x0070C0);
    }

    #[test]
    fn test_parse_color_rejects_garbage() {
        assert!(parse_color("not-a-color").is_err());
        assert!(parse_color("FFF").is_err());
    }

    #[test]
    fn test_level_color_lookup() {
        let config = load_config(None).unwrap();
        assert_eq!(config.levels.for_level(Level::High), config.levels.high);
    }
}
