//! Cell format palette, resolved once per workbook from the configuration.

use crate::config::Config;
use crate::types::Level;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder};

/// Every named cell format the layout engine uses.
pub struct FormatPalette {
    pub information_header: Format,
    pub header: Format,
    pub sub_header: Format,
    pub minimal: Format,
    pub intermediary: Format,
    pub enhanced: Format,
    pub high: Format,
    pub check: Format,
    pub success: Format,
    pub failed: Format,
    pub not_applicable: Format,
    pub bold: Format,
    pub regular: Format,
    pub classification: Format,
    pub classification_center: Format,
}

impl FormatPalette {
    pub fn new(config: &Config) -> Self {
        let header_base = || {
            Format::new()
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_font_color(config.report.header_font)
                .set_background_color(config.report.header_background)
        };
        // Bold centered text in the configured color, on the default background
        let colored = |font_color: u32| {
            Format::new()
                .set_bold()
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_font_color(font_color)
                .set_background_color(config.report.default_background)
        };
        let plain = || {
            Format::new()
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter)
                .set_font_color(config.report.default_font)
                .set_background_color(config.report.default_background)
        };

        FormatPalette {
            information_header: header_base().set_bold().set_font_size(14),
            header: header_base().set_bold(),
            sub_header: header_base().set_background_color(config.report.sub_header_background),
            minimal: colored(config.levels.minimal),
            intermediary: colored(config.levels.intermediary),
            enhanced: colored(config.levels.enhanced),
            high: colored(config.levels.high),
            check: plain(),
            success: colored(config.status.success),
            failed: colored(config.status.failed),
            not_applicable: colored(config.status.not_applicable),
            bold: plain().set_bold(),
            regular: plain(),
            classification: plain()
                .set_font_color(config.classification.font)
                .set_background_color(config.classification.background),
            classification_center: Format::new()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_font_color(config.classification.font)
                .set_background_color(config.classification.background),
        }
    }

    pub fn for_level(&self, level: Level) -> &Format {
        match level {
            Level::Minimal => &self.minimal,
            Level::Intermediary => &self.intermediary,
            Level::Enhanced => &self.enhanced,
            Level::High => &self.high,
        }
    }

    /// Verdict format for a rule.
    pub fn for_verdict(&self, compliant: bool) -> &Format {
        if compliant { &self.success } else { &self.failed }
    }
}
