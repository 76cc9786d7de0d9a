//! Workbook generation: layout, save, and the compatibility rewrite.

pub mod compat;
pub mod formats;
pub mod sheets;

use crate::config::Config;
use crate::error::ReportError;
use crate::locale::Locale;
use crate::metadata::ReportMetadata;
use crate::sanitize::SheetNameIndex;
use crate::types::Baseline;
use formats::FormatPalette;
use log::debug;
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};

/// Build the workbook and save it as `<output>/<filename>.xlsx`.
///
/// Sheet order is information, synthesis, then one results sheet per
/// category in baseline order; worksheet names come from the
/// [`SheetNameIndex`] so the synthesis formulas always resolve.
pub fn generate_workbook(
    baseline: &Baseline,
    metadata: &ReportMetadata,
    locale: &Locale,
    config: &Config,
    output_dir: &Path,
    filename: &str,
    tool_version: &str,
    repo_url: &str,
) -> Result<PathBuf, ReportError> {
    let index = SheetNameIndex::build(baseline);
    let palette = FormatPalette::new(config);
    let mut workbook = Workbook::new();

    sheets::add_information_sheet(&mut workbook, &palette, config, locale, baseline, metadata, tool_version, repo_url)?;
    let layout = sheets::add_synthesis_sheet(&mut workbook, &palette, locale, baseline, &index)?;
    for category in &baseline.categories {
        sheets::add_results_sheet(&mut workbook, &palette, locale, category, index.get(&category.id))?;
    }
    sheets::add_category_charts(&mut workbook, config, locale, baseline, &index, &layout)?;

    let path = output_dir.join(format!("{}.xlsx", filename));
    debug!("Saving workbook to {:?}", path);
    workbook.save(&path)?;
    Ok(path)
}

#[cfg(test)]
#[path = "workbook_test.rs"]
mod workbook_test;
