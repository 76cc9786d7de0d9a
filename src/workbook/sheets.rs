//! Worksheet layout: information sheet, per-category results sheets and the
//! synthesis sheet with its aggregation formulas and charts.
//!
//! Aggregation formulas are written with an empty cached result on purpose:
//! the compatibility rewriter identifies them by that emptiness, and a
//! conforming consumer recalculates them on open.

use crate::config::Config;
use crate::error::ReportError;
use crate::locale::Locale;
use crate::metadata::ReportMetadata;
use crate::sanitize::SheetNameIndex;
use crate::types::{Baseline, Category, Level};
use crate::workbook::formats::FormatPalette;
use crate::xl;
use rust_xlsxwriter::{
    Chart, ChartSolidFill, ChartType, ConditionalFormatText, ConditionalFormatTextRule,
    DataValidation, Format, Formula, Workbook, Worksheet,
};

// Results sheet columns: B = level, C:E = rule title, F = result.
const LEVEL_COL: u16 = 1;
const TITLE_FIRST_COL: u16 = 2;
const TITLE_LAST_COL: u16 = 4;
const RESULT_COL: u16 = 5;
const RESULTS_FIRST_RULE_ROW: u32 = 4;

// Synthesis sheet columns: B:D = category, E:H = success counts per level,
// I:L = failed counts per level.
const SYNTH_NAME_FIRST_COL: u16 = 1;
const SYNTH_NAME_LAST_COL: u16 = 3;
const SYNTH_SUCCESS_FIRST_COL: u16 = 4;
const SYNTH_FAILED_FIRST_COL: u16 = 8;
const SYNTH_LAST_COL: u16 = 11;
const SYNTH_LABEL_ROW: u32 = 4;
const SYNTH_FIRST_CATEGORY_ROW: u32 = 5;

/// The cell every other sheet's classification banner points at.
const CLASSIFICATION_CELL: &str = "D10";

/// Row positions the chart pass needs from the synthesis sheet.
pub struct SynthesisLayout {
    /// `(category id, 0-based synthesis row)` in baseline order.
    pub category_rows: Vec<(String, u32)>,
    pub total_row: u32,
}

pub fn add_information_sheet(
    workbook: &mut Workbook,
    palette: &FormatPalette,
    config: &Config,
    locale: &Locale,
    baseline: &Baseline,
    metadata: &ReportMetadata,
    tool_version: &str,
    repo_url: &str,
) -> Result<(), ReportError> {
    let ws = workbook.add_worksheet();
    ws.set_name(locale.gettext("information"))?;
    ws.set_screen_gridlines(false);
    ws.set_column_width(0, 2)?;
    ws.set_column_width(1, 12)?;
    ws.set_column_width(2, 12)?;
    ws.set_column_width(3, 100)?;

    ws.merge_range(1, 1, 6, 3, locale.gettext("information_header_title"), &palette.information_header)?;

    ws.merge_range(8, 1, 8, 3, locale.gettext("data_classification"), &palette.sub_header)?;
    ws.merge_range(9, 1, 9, 2, locale.gettext("classification_level"), &palette.bold)?;
    // D10, the classification cell referenced from every other sheet
    ws.write_string_with_format(9, 3, &metadata.classification_level, &palette.classification)?;

    let options: Vec<String> = config
        .classification
        .options
        .iter()
        .map(|option| option.trim().chars().take(31).collect())
        .collect();
    let options: Vec<&str> = options.iter().map(String::as_str).collect();
    let validation = DataValidation::new().allow_list_strings(&options)?;
    ws.add_data_validation(9, 3, 9, 3, &validation)?;

    ws.merge_range(11, 1, 11, 3, locale.gettext("general_information"), &palette.sub_header)?;
    let completed = crate::metadata::today();
    let rows: [(&str, &str); 4] = [
        ("date_of_completion", &completed),
        ("used_baseline", &baseline.title),
        ("tool_version", tool_version),
        ("online_tool_version", repo_url),
    ];
    for (offset, (key, value)) in rows.into_iter().enumerate() {
        let row = 12 + offset as u32;
        ws.merge_range(row, 1, row, 2, locale.gettext(key), &palette.bold)?;
        ws.write_string_with_format(row, 3, value, &palette.regular)?;
    }

    ws.merge_range(17, 1, 17, 3, locale.gettext("audited_equipment"), &palette.sub_header)?;
    ws.merge_range(18, 1, 18, 2, locale.gettext("audited_asset"), &palette.bold)?;
    ws.write_string_with_format(18, 3, &metadata.audited_asset, &palette.regular)?;

    Ok(())
}

pub fn add_results_sheet(
    workbook: &mut Workbook,
    palette: &FormatPalette,
    locale: &Locale,
    category: &Category,
    sheet_name: &str,
) -> Result<(), ReportError> {
    let ws = workbook.add_worksheet();
    ws.set_name(sheet_name)?;
    ws.set_screen_gridlines(false);
    ws.set_column_width(0, 2)?;
    ws.set_column_width(LEVEL_COL, 20)?;
    for col in TITLE_FIRST_COL..=TITLE_LAST_COL {
        ws.set_column_width(col, 35)?;
    }
    ws.set_column_width(RESULT_COL, 20)?;

    classification_banner(ws, locale, TITLE_FIRST_COL, TITLE_LAST_COL, &palette.classification_center)?;

    ws.set_row_height(2, 25)?;
    ws.merge_range(2, 1, 2, RESULT_COL, &category.name, &palette.header)?;

    add_label_conditional_formats(ws, palette, locale, 2, LEVEL_COL)?;
    add_label_conditional_formats(ws, palette, locale, 0, RESULT_COL)?;

    ws.write_string_with_format(3, LEVEL_COL, locale.gettext("level"), &palette.sub_header)?;
    ws.merge_range(3, TITLE_FIRST_COL, 3, TITLE_LAST_COL, locale.gettext("rule"), &palette.sub_header)?;
    ws.write_string_with_format(3, RESULT_COL, locale.gettext("result"), &palette.sub_header)?;

    let level_labels: Vec<&str> = Level::ALL.iter().map(|level| locale.gettext(level.as_key())).collect();
    let level_validation = DataValidation::new().allow_list_strings(&level_labels)?;
    let status_labels =
        [locale.gettext("success"), locale.gettext("failed"), locale.gettext("na")];
    let status_validation = DataValidation::new().allow_list_strings(&status_labels)?;

    let mut row = RESULTS_FIRST_RULE_ROW;
    for rule in &category.rules {
        ws.add_data_validation(row, LEVEL_COL, row, LEVEL_COL, &level_validation)?;
        ws.add_data_validation(row, RESULT_COL, row, RESULT_COL, &status_validation)?;

        ws.write_string_with_format(
            row,
            LEVEL_COL,
            locale.gettext(rule.level.as_key()),
            palette.for_level(rule.level),
        )?;
        ws.merge_range(row, TITLE_FIRST_COL, row, TITLE_LAST_COL, &rule.title, &palette.check)?;

        let verdict_key = if rule.compliant { "success" } else { "failed" };
        ws.write_string_with_format(
            row,
            RESULT_COL,
            locale.gettext(verdict_key),
            palette.for_verdict(rule.compliant),
        )?;

        row += 1;
    }

    Ok(())
}

pub fn add_synthesis_sheet(
    workbook: &mut Workbook,
    palette: &FormatPalette,
    locale: &Locale,
    baseline: &Baseline,
    index: &SheetNameIndex,
) -> Result<SynthesisLayout, ReportError> {
    let ws = workbook.add_worksheet();
    ws.set_name(locale.gettext("summary"))?;
    ws.set_screen_gridlines(false);
    ws.set_column_width(0, 2)?;
    for col in SYNTH_NAME_FIRST_COL..=SYNTH_LAST_COL {
        ws.set_column_width(col, 20)?;
    }
    ws.set_row_height(2, 25)?;

    classification_banner(ws, locale, SYNTH_NAME_FIRST_COL, SYNTH_LAST_COL, &palette.classification_center)?;

    ws.merge_range(2, 1, 2, SYNTH_LAST_COL, locale.gettext("summary"), &palette.header)?;
    ws.merge_range(3, SYNTH_NAME_FIRST_COL, 4, SYNTH_NAME_LAST_COL, locale.gettext("categories"), &palette.sub_header)?;
    ws.merge_range(3, SYNTH_SUCCESS_FIRST_COL, 3, SYNTH_FAILED_FIRST_COL - 1, locale.gettext("success"), &palette.sub_header)?;
    ws.merge_range(3, SYNTH_FAILED_FIRST_COL, 3, SYNTH_LAST_COL, locale.gettext("failed"), &palette.sub_header)?;
    for (offset, level) in Level::ALL.iter().enumerate() {
        let label = locale.gettext(level.as_key());
        ws.write_string_with_format(SYNTH_LABEL_ROW, SYNTH_SUCCESS_FIRST_COL + offset as u16, label, &palette.sub_header)?;
        ws.write_string_with_format(SYNTH_LABEL_ROW, SYNTH_FAILED_FIRST_COL + offset as u16, label, &palette.sub_header)?;
    }

    let mut category_rows = Vec::with_capacity(baseline.categories.len());
    let mut row = SYNTH_FIRST_CATEGORY_ROW;
    for category in &baseline.categories {
        ws.merge_range(row, SYNTH_NAME_FIRST_COL, row, SYNTH_NAME_LAST_COL, &category.name, &palette.check)?;

        let sheet_name = index.get(&category.id);
        for (offset, level) in Level::ALL.iter().enumerate() {
            let success = countifs_formula(sheet_name, locale.gettext(level.as_key()), locale.gettext("success"));
            let failed = countifs_formula(sheet_name, locale.gettext(level.as_key()), locale.gettext("failed"));
            write_uncached_formula(ws, row, SYNTH_SUCCESS_FIRST_COL + offset as u16, &success, &palette.check)?;
            write_uncached_formula(ws, row, SYNTH_FAILED_FIRST_COL + offset as u16, &failed, &palette.check)?;
        }

        category_rows.push((category.id.clone(), row));
        row += 1;
    }

    let total_row = row;
    ws.merge_range(total_row, SYNTH_NAME_FIRST_COL, total_row, SYNTH_NAME_LAST_COL, "Total", &palette.bold)?;
    for col in SYNTH_SUCCESS_FIRST_COL..=SYNTH_LAST_COL {
        if category_rows.is_empty() {
            ws.write_number_with_format(total_row, col, 0, &palette.bold)?;
        } else {
            let sum = format!("=SUM({})", xl::range(SYNTH_FIRST_CATEGORY_ROW, col, total_row - 1, col));
            write_uncached_formula(ws, total_row, col, &sum, &palette.bold)?;
        }
    }

    Ok(SynthesisLayout { category_rows, total_row })
}

/// One stacked column chart per category results sheet, success vs failed
/// across the four levels, reading the category's synthesis row.
pub fn add_category_charts(
    workbook: &mut Workbook,
    config: &Config,
    locale: &Locale,
    baseline: &Baseline,
    index: &SheetNameIndex,
    layout: &SynthesisLayout,
) -> Result<(), ReportError> {
    let summary_name = locale.gettext("summary");

    for (category_id, synthesis_row) in &layout.category_rows {
        let mut chart = Chart::new(ChartType::ColumnStacked);
        chart.title().set_name(locale.gettext("compliance_chart_title"));
        chart.x_axis().set_name(locale.gettext("levels"));
        chart.y_axis().set_name(locale.gettext("nb_checks"));

        chart
            .add_series()
            .set_name(locale.gettext("success"))
            .set_categories((summary_name, SYNTH_LABEL_ROW, SYNTH_SUCCESS_FIRST_COL, SYNTH_LABEL_ROW, SYNTH_FAILED_FIRST_COL - 1))
            .set_values((summary_name, *synthesis_row, SYNTH_SUCCESS_FIRST_COL, *synthesis_row, SYNTH_FAILED_FIRST_COL - 1))
            .set_format(ChartSolidFill::new().set_color(config.status.success));
        chart
            .add_series()
            .set_name(locale.gettext("failed"))
            .set_categories((summary_name, SYNTH_LABEL_ROW, SYNTH_SUCCESS_FIRST_COL, SYNTH_LABEL_ROW, SYNTH_FAILED_FIRST_COL - 1))
            .set_values((summary_name, *synthesis_row, SYNTH_FAILED_FIRST_COL, *synthesis_row, SYNTH_LAST_COL))
            .set_format(ChartSolidFill::new().set_color(config.status.failed));

        let rule_count = baseline
            .categories
            .iter()
            .find(|category| &category.id == category_id)
            .map(|category| category.rules.len() as u32)
            .unwrap_or(0);

        let ws = workbook.worksheet_from_name(index.get(category_id))?;
        ws.insert_chart(RESULTS_FIRST_RULE_ROW + rule_count + 2, LEVEL_COL, &chart)?;
    }

    Ok(())
}

/// Merged banner formula pointing at the information sheet's classification
/// cell.
fn classification_banner(
    ws: &mut Worksheet,
    locale: &Locale,
    first_col: u16,
    last_col: u16,
    format: &Format,
) -> Result<(), ReportError> {
    let formula = format!("={}!{}", xl::quoted(locale.gettext("information")), CLASSIFICATION_CELL);
    ws.merge_range(0, first_col, 0, last_col, "", format)?;
    // An empty `set_result` falls back to the worksheet default ("0"), so the
    // default itself must be empty for the cached value to stay empty.
    ws.set_formula_result_default("");
    ws.write_formula_with_format(0, first_col, Formula::new(formula).set_result(""), format)?;
    Ok(())
}

/// The 7 text-contains rules mapping localized level and status labels to
/// their configured colors, over a full column.
fn add_label_conditional_formats(
    ws: &mut Worksheet,
    palette: &FormatPalette,
    locale: &Locale,
    first_row: u32,
    col: u16,
) -> Result<(), ReportError> {
    let rules: [(&str, &Format); 7] = [
        ("minimal", &palette.minimal),
        ("intermediary", &palette.intermediary),
        ("enhanced", &palette.enhanced),
        ("high", &palette.high),
        ("success", &palette.success),
        ("failed", &palette.failed),
        ("na", &palette.not_applicable),
    ];

    for (key, format) in rules {
        let condition = ConditionalFormatText::new()
            .set_rule(ConditionalFormatTextRule::Contains(locale.gettext(key).to_string()))
            .set_format(format);
        ws.add_conditional_format(first_row, col, xl::MAX_ROW, col, &condition)?;
    }

    Ok(())
}

/// Cross-sheet counting formula over a category sheet's level and result
/// columns. Semicolon-separated, matching the canonical workbook form the
/// compatibility rewriter looks for.
fn countifs_formula(sheet_name: &str, level_label: &str, status_label: &str) -> String {
    let qualifier = xl::quoted(sheet_name);
    let level_range = format!("{}!{}", qualifier, xl::range(0, LEVEL_COL, xl::MAX_ROW, LEVEL_COL));
    let result_range = format!("{}!{}", qualifier, xl::range(0, RESULT_COL, xl::MAX_ROW, RESULT_COL));
    format!(
        "=COUNTIFS({};\"{}\"; {};\"{}\")",
        level_range, level_label, result_range, status_label
    )
}

fn write_uncached_formula(
    ws: &mut Worksheet,
    row: u32,
    col: u16,
    formula: &str,
    format: &Format,
) -> Result<(), ReportError> {
    // An empty `set_result` falls back to the worksheet default ("0"), so the
    // default itself must be empty for the cached value to stay empty.
    ws.set_formula_result_default("");
    ws.write_formula_with_format(row, col, Formula::new(formula).set_result(""), format)?;
    Ok(())
}
