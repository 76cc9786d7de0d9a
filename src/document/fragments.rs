//! Generated AsciiDoc fragments: per-rule files, per-category files and the
//! synthesis table rows.
//!
//! Rule transcript fields (`check`, `expected`, `output`) go into literal
//! blocks verbatim and are never escaped. Non-compliant rules carry a
//! `nc_<id>` anchor which the synthesis table cross-references; numbering of
//! non-conformities is delegated to the renderer's `{counter:...}` directive
//! so fragment generation stays order-independent.

use crate::locale::Locale;
use crate::types::{Baseline, Category, Rule};
use std::fmt::Write;

/// Which rules the synthesis table lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisScope {
    /// Non-compliant rules only (default).
    NonCompliantOnly,
    /// Every rule; compliant rows carry the plain rule title since only
    /// non-compliant rules have an anchor to point at.
    AllRules,
}

/// One `=== title` section per rule with description, references, the three
/// verbatim transcripts, and the verdict block.
pub fn rule_fragment(rule: &Rule, locale: &Locale) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {}", rule.title);
    let _ = writeln!(out, "{}", rule.description);

    if !rule.references.is_empty() {
        let _ = writeln!(out, "\n{}\n", locale.gettext("see_also"));
        for reference in &rule.references {
            let _ = writeln!(out, "* {}", reference);
        }
    }

    out.push('\n');
    push_listing(&mut out, locale.gettext("check_command"), "shell", &rule.check);
    push_listing(&mut out, locale.gettext("expected_result"), "console", &rule.expected);
    push_listing(&mut out, locale.gettext("terminal_output"), "console", &rule.output);

    if rule.compliant {
        out.push_str(
            "ifeval::[\"{document-lang}\" == \"EN\"]\n\
             [.compliant]#The configuration is compliant with the rule#.\n\
             endif::[]\n\
             ifeval::[\"{document-lang}\" == \"FR\"]\n\
             [.compliant]#La configuration est en conformité avec la règle#.\n\
             endif::[]\n",
        );
    } else {
        let _ = writeln!(out, ".{}", rule.title);
        let _ = writeln!(out, "[#nc_{}, caption=\"[NC-{{counter:non-compliance:001}}] \"]", rule.id);
        let _ = writeln!(out, "====\n{}\n====", rule.recommendation);
    }

    out.push('\n');
    out
}

fn push_listing(out: &mut String, title: &str, language: &str, body: &str) {
    let _ = writeln!(out, ".{}", title);
    let _ = writeln!(out, "[source%linenums,{}]", language);
    let _ = writeln!(out, "[options=\"nowrap\"]");
    let _ = writeln!(out, "----\n{}\n----\n", body);
}

/// Category section: anchored heading, optional description, then one
/// include per rule in baseline order. Rule files live in the same build
/// directory, so includes are by file name.
pub fn category_fragment(category: &Category) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[#{},reftext={}]", category.id, category.name);
    let _ = writeln!(out, "== {}", category.name);
    if let Some(description) = &category.description {
        let _ = writeln!(out, "{}", description);
    }
    out.push_str("\n\n");

    for rule in &category.rules {
        let _ = writeln!(out, "include::{}.adoc[]", rule.id);
    }

    out.push('\n');
    out
}

/// Table rows for the synthesis fragment, in baseline order.
pub fn synthesis_rows(baseline: &Baseline, locale: &Locale, scope: SynthesisScope) -> String {
    let mut rows = String::new();

    for category in &baseline.categories {
        for rule in &category.rules {
            let title_cell = if !rule.compliant {
                format!("<<nc_{}>>", rule.id)
            } else if scope == SynthesisScope::AllRules {
                rule.title.clone()
            } else {
                continue;
            };

            let _ = writeln!(
                rows,
                "| <<{}>> | {} | {} | {} ",
                category.id,
                title_cell,
                locale.gettext(rule.level.as_key()),
                locale.gettext(rule.severity.as_key()),
            );
        }
    }

    rows
}

#[cfg(test)]
#[path = "fragments_test.rs"]
mod fragments_test;
