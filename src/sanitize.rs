//! Worksheet-name derivation from free-text category names.
//!
//! The sanitized name is the join key between a category's results sheet and
//! every synthesis formula that references it, so it is computed exactly once
//! per category by [`SheetNameIndex`] and threaded to all consumers. Silent
//! divergence here turns synthesis cells into zeros without any error.

use crate::types::Baseline;

/// Worksheet names are capped at 31 characters by the xlsx format.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Derive a safe worksheet name from a free-text category name.
///
/// Truncation happens *before* tag stripping and character filtering: a tag
/// cut in half by the 31-char boundary loses its closing bracket and falls
/// through to the character filter instead. This matches the historical
/// behavior the rest of the layout depends on.
///
/// Pure function: the same input always yields the same output.
pub fn sanitize_sheet_name(name: &str) -> String {
    let truncated: String = name.chars().take(MAX_SHEET_NAME_LEN).collect();
    strip_tags(&truncated).chars().filter(|&c| is_allowed(c)).collect()
}

/// Remove complete `<...>` tag substrings. An unterminated `<` is kept and
/// left to the character filter.
fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.char_indices();

    while let Some((idx, c)) = chars.next() {
        if c == '<' {
            if let Some(end) = s[idx..].find('>') {
                // Skip everything through the closing bracket
                let close = idx + end;
                while let Some((i, _)) = chars.next() {
                    if i == close {
                        break;
                    }
                }
                continue;
            }
        }
        out.push(c);
    }

    out
}

/// Allowed set: base Latin letters, the accented letters of the target
/// locale, digits, whitespace, hyphen. Case-insensitive.
fn is_allowed(c: char) -> bool {
    const ACCENTED: [char; 12] = ['à', 'â', 'ç', 'é', 'è', 'ê', 'ë', 'î', 'ï', 'ô', 'û', 'ù'];

    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || c == '-'
        || c.to_lowercase().any(|lower| ACCENTED.contains(&lower))
}

/// Worksheet name for every category, computed once per generation run.
///
/// Resolves the two cases `sanitize_sheet_name` leaves open:
/// - an empty or whitespace-only result falls back to the category id,
/// - colliding names get a deterministic numeric suffix, with the base
///   trimmed so the result stays within the length cap.
#[derive(Debug, Clone)]
pub struct SheetNameIndex {
    entries: Vec<(String, String)>,
}

impl SheetNameIndex {
    pub fn build(baseline: &Baseline) -> Self {
        let mut entries: Vec<(String, String)> = Vec::with_capacity(baseline.categories.len());

        for category in &baseline.categories {
            let mut base = sanitize_sheet_name(&category.name);
            if base.trim().is_empty() {
                base = category.id.chars().take(MAX_SHEET_NAME_LEN).collect();
            }

            let name = dedupe(&entries, base);
            entries.push((category.id.clone(), name));
        }

        SheetNameIndex { entries }
    }

    /// Worksheet name for a category id. Panics only on ids that were not in
    /// the baseline the index was built from.
    pub fn get(&self, category_id: &str) -> &str {
        self.entries
            .iter()
            .find(|(id, _)| id == category_id)
            .map(|(_, name)| name.as_str())
            .unwrap_or_else(|| panic!("no sheet name indexed for category '{}'", category_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(id, name)| (id.as_str(), name.as_str()))
    }
}

/// Worksheet names are case-insensitively unique in xlsx.
fn dedupe(entries: &[(String, String)], base: String) -> String {
    let taken = |candidate: &str| {
        entries.iter().any(|(_, name)| name.to_lowercase() == candidate.to_lowercase())
    };

    if !taken(&base) {
        return base;
    }

    for n in 2.. {
        let suffix = format!(" {}", n);
        let keep = MAX_SHEET_NAME_LEN.saturating_sub(suffix.chars().count());
        let mut candidate: String = base.chars().take(keep).collect();
        candidate.push_str(&suffix);
        if !taken(&candidate) {
            return candidate;
        }
    }

    unreachable!("dedupe suffix search is unbounded")
}

#[cfg(test)]
#[path = "sanitize_test.rs"]
mod sanitize_test;
