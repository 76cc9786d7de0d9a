//! Baseline loading and the minimal validation rendering depends on.

use crate::error::ReportError;
use crate::types::Baseline;
use log::debug;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Load a baseline from a JSON file.
///
/// The only schema check performed is category-id uniqueness: ids become
/// document anchors and worksheet fallback names, so a duplicate would
/// silently merge cross-references.
pub fn load_baseline(path: &Path) -> Result<Baseline, ReportError> {
    debug!("Loading baseline from {:?}", path);

    let content = fs::read_to_string(path)?;
    let baseline: Baseline = serde_json::from_str(&content)?;

    let mut seen = HashSet::new();
    for category in &baseline.categories {
        if !seen.insert(category.id.as_str()) {
            return Err(ReportError::DuplicateCategoryId(category.id.clone()));
        }
    }

    debug!("Loaded baseline '{}' with {} categories / {} rules", baseline.title, baseline.categories.len(), baseline.rule_count());

    Ok(baseline)
}
