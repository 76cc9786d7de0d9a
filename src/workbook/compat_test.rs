use super::*;
use crate::config::load_config;
use crate::locale::{Lang, Locale};
use crate::metadata::ReportMetadata;
use crate::types::{Baseline, Category, Level, Rule, Severity};
use crate::workbook::generate_workbook;
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

fn sample_baseline() -> Baseline {
    let rule = |id: &str, compliant| Rule {
        id: format!("r-{}", id),
        title: format!("Rule {}", id),
        description: "desc".to_string(),
        level: Level::Minimal,
        severity: Severity::Low,
        compliant,
        check: "check".to_string(),
        expected: "expected".to_string(),
        output: "output".to_string(),
        recommendation: String::new(),
        references: vec![],
    };
    Baseline {
        title: "t".to_string(),
        categories: vec![
            Category {
                id: "network".to_string(),
                name: "Network Controls".to_string(),
                description: None,
                rules: vec![rule("a", true), rule("b", false)],
            },
            Category {
                id: "auth".to_string(),
                name: "Authentication".to_string(),
                description: None,
                rules: vec![rule("c", false)],
            },
        ],
    }
}

fn generate(baseline: &Baseline, dir: &Path) -> PathBuf {
    let config = load_config(None).unwrap();
    let locale = Locale::new(Lang::En);
    generate_workbook(baseline, &sample_metadata(), &locale, &config, dir, "audit", "0.4.2", "https://example.org").unwrap()
}

fn read_part(workbook: &Path, part: &str) -> String {
    let file = std::fs::File::open(workbook).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut entry = archive.by_name(part).unwrap();
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    content
}

fn read_all_parts(workbook: &Path) -> Vec<(String, Vec<u8>)> {
    let file = std::fs::File::open(workbook).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut parts = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).unwrap();
        parts.push((entry.name().to_string(), bytes));
    }
    parts
}

#[test]
fn test_compat_rewrites_counting_aggregates() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = generate(&sample_baseline(), dir.path());
    let compat = write_compat_workbook(&workbook, "Summary").unwrap();

    assert_eq!(compat, dir.path().join("audit-compat.xlsx"));

    let original = read_part(&workbook, "xl/worksheets/sheet2.xml");
    assert!(original.contains(";"));

    let rewritten = read_part(&compat, "xl/worksheets/sheet2.xml");
    assert!(rewritten.contains(
        "COUNTIFS('Network Controls'!B1:B1048576,&quot;Minimal&quot;,'Network Controls'!F1:F1048576,&quot;Success&quot;)"
    ));
    assert!(!rewritten.contains("COUNTIFS('Network Controls'!B1:B1048576;"));
}

#[test]
fn test_compat_leaves_sum_totals_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = generate(&sample_baseline(), dir.path());
    let compat = write_compat_workbook(&workbook, "Summary").unwrap();

    let rewritten = read_part(&compat, "xl/worksheets/sheet2.xml");
    assert!(rewritten.contains("SUM(E6:E7)"));
}

#[test]
fn test_compat_leaves_other_parts_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = generate(&sample_baseline(), dir.path());
    let compat = write_compat_workbook(&workbook, "Summary").unwrap();

    let original = read_all_parts(&workbook);
    let rewritten = read_all_parts(&compat);
    assert_eq!(
        original.iter().map(|(name, _)| name).collect::<Vec<_>>(),
        rewritten.iter().map(|(name, _)| name).collect::<Vec<_>>(),
    );
    for ((name, before), (_, after)) in original.iter().zip(&rewritten) {
        if name != "xl/worksheets/sheet2.xml" {
            assert_eq!(before, after, "part {} changed", name);
        }
    }
}

#[test]
fn test_compat_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = generate(&sample_baseline(), dir.path());
    let first = write_compat_workbook(&workbook, "Summary").unwrap();
    let second = write_compat_workbook(&first, "Summary").unwrap();

    let first_parts = read_all_parts(&first);
    let second_parts = read_all_parts(&second);
    assert_eq!(first_parts, second_parts);
}

#[test]
fn test_compat_without_matching_sheet_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = generate(&sample_baseline(), dir.path());
    let compat = write_compat_workbook(&workbook, "No Such Sheet").unwrap();

    assert_eq!(read_all_parts(&workbook), read_all_parts(&compat));
}

#[test]
fn test_compat_formula_shape_match() {
    let formula = "COUNTIFS('Net'!B1:B1048576;\"Minimal\"; 'Net'!F1:F1048576;\"Success\")";
    assert_eq!(
        compat_formula(formula).unwrap(),
        "COUNTIFS('Net'!B1:B1048576,&quot;Minimal&quot;,'Net'!F1:F1048576,&quot;Success&quot;)"
    );
}

#[test]
fn test_compat_formula_accepts_escaped_quotes() {
    let formula = "COUNTIFS('Net'!B1:B1048576;&quot;Minimal&quot;; 'Net'!F1:F1048576;&quot;Success&quot;)";
    assert_eq!(
        compat_formula(formula).unwrap(),
        "COUNTIFS('Net'!B1:B1048576,&quot;Minimal&quot;,'Net'!F1:F1048576,&quot;Success&quot;)"
    );
}

#[test]
fn test_compat_formula_rejects_other_shapes() {
    assert!(compat_formula("SUM(E6:E7)").is_none());
    assert!(compat_formula("COUNTIFS(B1:B10;\"x\")").is_none());
    // Unqualified ranges do not match.
    assert!(compat_formula("COUNTIFS(B1:B10;\"x\"; F1:F10;\"y\")").is_none());
    // Its own output has no separators left, so a second pass skips it.
    assert!(
        compat_formula(
            "COUNTIFS('Net'!B1:B1048576,&quot;Minimal&quot;,'Net'!F1:F1048576,&quot;Success&quot;)"
        )
        .is_none()
    );
}

#[test]
fn test_split_top_level_respects_quoted_spans() {
    assert_eq!(split_top_level("a;b;c"), vec!["a", "b", "c"]);
    assert_eq!(split_top_level("'x;y'!A1:A2;\"a;b\""), vec!["'x;y'!A1:A2", "\"a;b\""]);
}

#[test]
fn test_cached_value_predicate() {
    assert!(cached_value_is_empty("</f><v></v></c>"));
    assert!(cached_value_is_empty("</f></c>"));
    assert!(cached_value_is_empty("</f><v/></c>"));
    assert!(!cached_value_is_empty("</f><v>3</v></c>"));
}

#[test]
fn test_rewrite_formulas_targets_only_empty_cached_aggregates() {
    let xml = concat!(
        "<c r=\"E6\"><f>COUNTIFS('N'!B1:B1048576;\"Minimal\"; 'N'!F1:F1048576;\"Success\")</f><v></v></c>",
        "<c r=\"F6\"><f>COUNTIFS('N'!B1:B1048576;\"High\"; 'N'!F1:F1048576;\"Failed\")</f><v>4</v></c>",
        "<c r=\"E8\"><f>SUM(E6:E7)</f><v></v></c>",
    );

    let rewritten = rewrite_formulas(xml);
    assert!(rewritten.contains("COUNTIFS('N'!B1:B1048576,&quot;Minimal&quot;,'N'!F1:F1048576,&quot;Success&quot;)"));
    // Cached value present, left alone.
    assert!(rewritten.contains("COUNTIFS('N'!B1:B1048576;\"High\"; 'N'!F1:F1048576;\"Failed\")"));
    assert!(rewritten.contains("<f>SUM(E6:E7)</f>"));
}

#[test]
fn test_synthesis_part_lookup() {
    let manifest = r#"<workbook><sheets>
        <sheet name="Information" sheetId="1" r:id="rId1"/>
        <sheet name="Summary" sheetId="2" r:id="rId2"/>
        <sheet name="Network Controls" sheetId="3" r:id="rId3"/>
    </sheets></workbook>"#;

    assert_eq!(
        synthesis_part_name(manifest, "Summary").unwrap(),
        Some("xl/worksheets/sheet2.xml".to_string())
    );
    assert_eq!(synthesis_part_name(manifest, "Nope").unwrap(), None);
}
