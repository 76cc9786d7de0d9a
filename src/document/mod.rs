//! Document generation: AsciiDoc fragment assembly and PDF rendering.
//!
//! Fragments are staged under `<output>/build/adoc/`; the header file is
//! written first and each subsequent fragment appends an `include::` line to
//! it, so the document reads in generation order: introduction, synthesis,
//! then every category with its rules.

pub mod fragments;
pub mod renderer;
pub mod templates;

use crate::error::ReportError;
use crate::locale::Locale;
use crate::metadata::{self, ReportMetadata};
use crate::types::Baseline;
use fragments::SynthesisScope;
use log::{debug, info};
use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use templates::TemplateSet;

pub struct DocumentOptions<'a> {
    pub filename: &'a str,
    pub pdf_theme: &'a str,
    pub scope: SynthesisScope,
    pub tool_version: &'a str,
    pub repo_url: &'a str,
}

/// Assemble the fragments, then hand the header to the renderer.
///
/// Returns the PDF path, or `None` when `asciidoctor-pdf` is unavailable or
/// fails; assembly errors are fatal.
pub fn generate_document(
    baseline: &Baseline,
    report_metadata: &ReportMetadata,
    locale: &Locale,
    template_set: &TemplateSet,
    options: &DocumentOptions,
    output_dir: &Path,
) -> Result<Option<PathBuf>, ReportError> {
    if !renderer::is_renderer_available() {
        info!("asciidoctor-pdf not found, skipping document generation");
        return Ok(None);
    }

    let header_file =
        assemble_document(baseline, report_metadata, locale, template_set, options, output_dir)?;

    Ok(renderer::render_pdf(&header_file, output_dir, options.filename, template_set, options.pdf_theme))
}

/// Write every fragment into `<output>/build/adoc/` and return the header
/// file path, ready for rendering.
pub fn assemble_document(
    baseline: &Baseline,
    report_metadata: &ReportMetadata,
    locale: &Locale,
    template_set: &TemplateSet,
    options: &DocumentOptions,
    output_dir: &Path,
) -> Result<PathBuf, ReportError> {
    let build_dir = output_dir.join("build").join("adoc");
    fs::create_dir_all(&build_dir)?;
    debug!("Staging document fragments in {:?}", build_dir);

    let header_file = write_header(report_metadata, baseline, locale, template_set, options, &build_dir)?;
    write_introduction(report_metadata, locale, template_set, &build_dir, &header_file)?;
    write_synthesis(baseline, locale, template_set, options.scope, &build_dir, &header_file)?;
    write_categories(baseline, locale, &build_dir, &header_file)?;

    Ok(header_file)
}

fn write_header(
    report_metadata: &ReportMetadata,
    baseline: &Baseline,
    locale: &Locale,
    template_set: &TemplateSet,
    options: &DocumentOptions,
    build_dir: &Path,
) -> Result<PathBuf, ReportError> {
    let lang = locale.lang().code().to_uppercase();
    let revdate = metadata::today();
    let template_dir = template_set.assets_dir.display().to_string();

    let header = templates::substitute(
        &template_set.header,
        &[
            ("MATCH_AND_REPLACE_DOCUMENT_LANG", lang.as_str()),
            ("MATCH_AND_REPLACE_FILENAME", options.filename),
            ("MATCH_AND_REPLACE_DOCUMENT_TITLE", locale.gettext("compliance_report_title")),
            ("MATCH_AND_REPLACE_DOCUMENT_SUBTITLE", &report_metadata.audited_asset),
            ("MATCH_AND_REPLACE_AUDITEE_NAME", &report_metadata.auditee_name),
            ("MATCH_AND_REPLACE_AUDITEE_CONTACT_FULL_NAME", &report_metadata.auditee_contact_full_name),
            ("MATCH_AND_REPLACE_AUDITEE_CONTACT_EMAIL", &report_metadata.auditee_contact_email),
            ("MATCH_AND_REPLACE_PROJECT_MANAGER_FULL_NAME", &report_metadata.project_manager_full_name),
            ("MATCH_AND_REPLACE_PROJECT_MANAGER_EMAIL", &report_metadata.project_manager_email),
            ("MATCH_AND_REPLACE_AUTHORS_LIST_FULL_NAME", &report_metadata.authors_full_name),
            ("MATCH_AND_REPLACE_AUTHORS_LIST_EMAIL", &report_metadata.authors_email),
            ("MATCH_AND_REPLACE_BASELINE_NAME", &baseline.title),
            ("MATCH_AND_REPLACE_REVNUMBER", &report_metadata.revision),
            ("MATCH_AND_REPLACE_REVDATE", &revdate),
            ("MATCH_AND_REPLACE_CLASSIFICATION_LEVEL", &report_metadata.classification_level),
            ("MATCH_AND_REPLACE_AUDITOR_COMPANY_NAME", &report_metadata.auditor_company_name),
            ("MATCH_AND_REPLACE_TEMPLATE_DIR", &template_dir),
            ("MATCH_AND_REPLACE_PDF_THEME", options.pdf_theme),
            ("MATCH_AND_REPLACE_REPO_URL", options.repo_url),
            ("MATCH_AND_REPLACE_PROJECT_VERSION", options.tool_version),
        ],
    );
    templates::check_resolved(&header)?;

    let header_file = build_dir.join("header.adoc");
    fs::write(&header_file, header)?;
    Ok(header_file)
}

/// Append an `include::` line to the assembled header. Fragments live next
/// to the header, so includes are by file name.
fn include_in_header(header_file: &Path, fragment_name: &str) -> Result<(), ReportError> {
    let mut file = OpenOptions::new().append(true).open(header_file)?;
    writeln!(file, "include::{}[]", fragment_name)?;
    Ok(())
}

fn write_introduction(
    report_metadata: &ReportMetadata,
    locale: &Locale,
    template_set: &TemplateSet,
    build_dir: &Path,
    header_file: &Path,
) -> Result<(), ReportError> {
    let auditee_rows = participant_rows(&report_metadata.auditee_contacts()?);
    let author_rows = participant_rows(&report_metadata.authors()?);

    let introduction = templates::substitute(
        &template_set.introduction,
        &[
            ("MATCH_AND_REPLACE_PARTICIPANTS", locale.gettext("participants")),
            ("MATCH_AND_REPLACE_ROLE", locale.gettext("role")),
            ("MATCH_AND_REPLACE_CONTACT_INFORMATION", locale.gettext("contact_information")),
            ("MATCH_AND_REPLACE_AUDITEE", locale.gettext("auditee")),
            ("MATCH_AND_REPLACE_ARRAY_AUDITEE", &auditee_rows),
            ("MATCH_AND_REPLACE_PROJECT_MANAGEMENT", locale.gettext("project_management")),
            ("MATCH_AND_REPLACE_PROJECT_MANAGER_FULL_NAME", &report_metadata.project_manager_full_name),
            ("MATCH_AND_REPLACE_PROJECT_MANAGER_EMAIL", &report_metadata.project_manager_email),
            ("MATCH_AND_REPLACE_AUTHORS", locale.gettext("authors")),
            ("MATCH_AND_REPLACE_ARRAY_AUTHORS", &author_rows),
            ("MATCH_AND_REPLACE_MODIFICATION_HISTORY", locale.gettext("modification_history")),
            ("MATCH_AND_REPLACE_AUTHOR", locale.gettext("author")),
            ("MATCH_AND_REPLACE_REPORT_WRITING", locale.gettext("report_writing")),
        ],
    );
    templates::check_resolved(&introduction)?;

    fs::write(build_dir.join("introduction.adoc"), introduction)?;
    include_in_header(header_file, "introduction.adoc")
}

/// Nested-table rows for a participant list, `!`-delimited.
fn participant_rows(participants: &[crate::metadata::Participant]) -> String {
    let mut rows = String::new();
    for participant in participants {
        rows.push_str(&format!("! *{}*\n! {}\n\n", participant.full_name, participant.email));
    }
    rows
}

fn write_synthesis(
    baseline: &Baseline,
    locale: &Locale,
    template_set: &TemplateSet,
    scope: SynthesisScope,
    build_dir: &Path,
    header_file: &Path,
) -> Result<(), ReportError> {
    let rows = fragments::synthesis_rows(baseline, locale, scope);

    let synthesis = templates::substitute(
        &template_set.synthesis,
        &[
            ("MATCH_AND_REPLACE_NC_SUMMARY_TITLE", locale.gettext("nc_summary_title")),
            ("MATCH_AND_REPLACE_RULE_CATEGORY", locale.gettext("categories")),
            ("MATCH_AND_REPLACE_RULE_NAME", locale.gettext("rule_name")),
            ("MATCH_AND_REPLACE_RULE_LEVEL", locale.gettext("rule_level")),
            ("MATCH_AND_REPLACE_RULE_SEVERITY", locale.gettext("rule_severity")),
            ("MATCH_AND_REPLACE_NON_CONFORMITY", &rows),
        ],
    );
    templates::check_resolved(&synthesis)?;

    fs::write(build_dir.join("synthesis.adoc"), synthesis)?;
    include_in_header(header_file, "synthesis.adoc")
}

fn write_categories(
    baseline: &Baseline,
    locale: &Locale,
    build_dir: &Path,
    header_file: &Path,
) -> Result<(), ReportError> {
    for category in &baseline.categories {
        for rule in &category.rules {
            let fragment = fragments::rule_fragment(rule, locale);
            fs::write(build_dir.join(format!("{}.adoc", rule.id)), fragment)?;
        }

        let fragment = fragments::category_fragment(category);
        let fragment_name = format!("{}.adoc", category.id);
        fs::write(build_dir.join(&fragment_name), fragment)?;
        include_in_header(header_file, &fragment_name)?;
    }
    Ok(())
}
