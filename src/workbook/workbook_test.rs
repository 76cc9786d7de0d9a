use super::*;
use crate::config::load_config;
use crate::locale::Lang;
use crate::types::{Category, Level, Rule, Severity};
use std::io::Read as _;

fn sample_metadata() -> ReportMetadata {
    toml::from_str(
        r#"
auditee_name = "ACME Corp"
auditee_contact_full_name = "Jo Miller"
auditee_contact_email = "jo@acme.example"
project_manager_full_name = "Alex Chen"
project_manager_email = "alex@auditor.example"
authors_full_name = "Charlie Fox"
authors_email = "charlie@auditor.example"
audited_asset = "web-frontend-01"
classification_level = "Restricted"
auditor_company_name = "Auditor SAS"
"#,
    )
    .unwrap()
}

fn rule(id: &str, level: Level, compliant: bool) -> Rule {
    Rule {
        id: id.to_string(),
        title: format!("Rule {}", id),
        description: "desc".to_string(),
        level,
        severity: Severity::Medium,
        compliant,
        check: "check".to_string(),
        expected: "expected".to_string(),
        output: "output".to_string(),
        recommendation: String::new(),
        references: vec![],
    }
}

fn sample_baseline() -> Baseline {
    Baseline {
        title: "Linux server v2".to_string(),
        categories: vec![
            Category {
                id: "network".to_string(),
                name: "Network Controls".to_string(),
                description: None,
                rules: vec![
                    rule("r1", Level::Minimal, true),
                    rule("r2", Level::High, false),
                    rule("r3", Level::Minimal, false),
                ],
            },
            Category {
                id: "access".to_string(),
                name: "Contrôle <x> d'accès!".to_string(),
                description: None,
                rules: vec![rule("r4", Level::Enhanced, true)],
            },
        ],
    }
}

fn generate(baseline: &Baseline, dir: &Path) -> PathBuf {
    let config = load_config(None).unwrap();
    let locale = Locale::new(Lang::En);
    generate_workbook(
        baseline,
        &sample_metadata(),
        &locale,
        &config,
        dir,
        "audit",
        "0.4.2",
        "https://example.org/audit-scribe",
    )
    .unwrap()
}

fn read_part(workbook: &Path, part: &str) -> String {
    let file = std::fs::File::open(workbook).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut entry = archive.by_name(part).unwrap();
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    content
}

#[test]
fn test_workbook_sheet_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let path = generate(&sample_baseline(), dir.path());
    assert!(path.is_file());

    let manifest = read_part(&path, "xl/workbook.xml");
    for name in ["Information", "Summary", "Network Controls", "Contrôle  daccès"] {
        assert!(manifest.contains(&format!("name=\"{}\"", name)), "missing sheet {}", name);
    }
}

#[test]
fn test_synthesis_formulas_reference_sanitized_sheet_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = generate(&sample_baseline(), dir.path());

    // The synthesis sheet is the second worksheet part.
    let synthesis = read_part(&path, "xl/worksheets/sheet2.xml").replace("&quot;", "\"");

    assert!(synthesis.contains(
        "COUNTIFS('Network Controls'!B1:B1048576;\"Minimal\"; 'Network Controls'!F1:F1048576;\"Success\")"
    ));
    assert!(synthesis.contains(
        "COUNTIFS('Contrôle  daccès'!B1:B1048576;\"High\"; 'Contrôle  daccès'!F1:F1048576;\"Failed\")"
    ));
}

#[test]
fn test_synthesis_formulas_have_empty_cached_results() {
    let dir = tempfile::tempdir().unwrap();
    let path = generate(&sample_baseline(), dir.path());

    let synthesis = read_part(&path, "xl/worksheets/sheet2.xml");
    assert!(synthesis.contains("COUNTIFS"));
    assert!(synthesis.contains("<v></v>"));
}

#[test]
fn test_synthesis_total_row_sums_category_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = generate(&sample_baseline(), dir.path());

    // Two categories occupy rows 6 and 7, total row is 8.
    let synthesis = read_part(&path, "xl/worksheets/sheet2.xml");
    assert!(synthesis.contains("SUM(E6:E7)"));
    assert!(synthesis.contains("SUM(L6:L7)"));
}

#[test]
fn test_labels_and_metadata_reach_shared_strings() {
    let dir = tempfile::tempdir().unwrap();
    let path = generate(&sample_baseline(), dir.path());

    let strings = read_part(&path, "xl/sharedStrings.xml");
    for needle in [
        "Compliance audit results",
        "Restricted",
        "Linux server v2",
        "web-frontend-01",
        "Rule r1",
        "Success",
        "Failed",
    ] {
        assert!(strings.contains(needle), "missing shared string {}", needle);
    }
}

#[test]
fn test_results_sheet_carries_validations_and_conditional_formats() {
    let dir = tempfile::tempdir().unwrap();
    let path = generate(&sample_baseline(), dir.path());

    // First category results sheet is the third worksheet part.
    let results = read_part(&path, "xl/worksheets/sheet3.xml");
    assert!(results.contains("<dataValidation"));
    assert!(results.contains("<conditionalFormatting"));
    // Banner formula points at the information sheet classification cell.
    assert!(results.contains("'Information'!D10") || results.contains("Information!D10"));
}

#[test]
fn test_results_sheet_has_one_merged_title_row_per_rule() {
    let dir = tempfile::tempdir().unwrap();
    let path = generate(&sample_baseline(), dir.path());

    // Three rules in the first category: title merges on rows 5 through 7.
    let results = read_part(&path, "xl/worksheets/sheet3.xml");
    for row in 5..=7 {
        assert!(results.contains(&format!("<mergeCell ref=\"C{row}:E{row}\"/>")));
    }
    assert!(!results.contains("<mergeCell ref=\"C8:E8\"/>"));
}

#[test]
fn test_charts_are_emitted_per_category() {
    let dir = tempfile::tempdir().unwrap();
    let path = generate(&sample_baseline(), dir.path());

    let file = std::fs::File::open(&path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    assert!(archive.by_name("xl/charts/chart1.xml").is_ok());
    drop(archive);

    let chart = read_part(&path, "xl/charts/chart1.xml");
    assert!(chart.contains("Summary"));
}

#[test]
fn test_empty_baseline_still_produces_a_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let empty = Baseline { title: "empty".to_string(), categories: vec![] };
    let path = generate(&empty, dir.path());

    let manifest = read_part(&path, "xl/workbook.xml");
    assert!(manifest.contains("name=\"Information\""));
    assert!(manifest.contains("name=\"Summary\""));

    // Total row holds literal zeros instead of SUM over an empty range.
    let synthesis = read_part(&path, "xl/worksheets/sheet2.xml");
    assert!(!synthesis.contains("SUM("));
    assert!(synthesis.contains("<v>0</v>"));
}

#[test]
fn test_category_with_no_rules_gets_header_only_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let baseline = Baseline {
        title: "t".to_string(),
        categories: vec![Category {
            id: "bare".to_string(),
            name: "Bare".to_string(),
            description: None,
            rules: vec![],
        }],
    };
    let path = generate(&baseline, dir.path());

    let manifest = read_part(&path, "xl/workbook.xml");
    assert!(manifest.contains("name=\"Bare\""));

    let synthesis = read_part(&path, "xl/worksheets/sheet2.xml");
    assert!(synthesis.contains("COUNTIFS('Bare'!"));
}
