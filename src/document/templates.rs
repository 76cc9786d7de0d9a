//! Template loading and placeholder substitution.
//!
//! Placeholders use the `MATCH_AND_REPLACE_<NAME>` convention. Substitution is
//! plain text replacement; after all passes, [`check_resolved`] scans the
//! fragment and aborts on any surviving token so a half-filled template can
//! never reach the renderer. A replacement whose token is absent from the
//! template is not an error.

use crate::error::ReportError;
use std::fs;
use std::path::{Path, PathBuf};

const PLACEHOLDER_PREFIX: &str = "MATCH_AND_REPLACE_";

const GENERIC_HEADER: &str = include_str!("../../templates/generic/header.adoc");
const GENERIC_INTRODUCTION: &str = include_str!("../../templates/generic/introduction.adoc");
const GENERIC_SYNTHESIS: &str = include_str!("../../templates/generic/synthesis.adoc");

/// The three fragment templates a document is assembled from, plus the
/// on-disk directory the renderer pulls images and themes from.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub header: String,
    pub introduction: String,
    pub synthesis: String,
    pub assets_dir: PathBuf,
}

impl TemplateSet {
    /// Load a custom template directory, or fall back to the embedded
    /// `generic` variant.
    pub fn load(custom_dir: Option<&Path>) -> Result<TemplateSet, ReportError> {
        match custom_dir {
            None => Ok(TemplateSet {
                header: GENERIC_HEADER.to_string(),
                introduction: GENERIC_INTRODUCTION.to_string(),
                synthesis: GENERIC_SYNTHESIS.to_string(),
                assets_dir: PathBuf::from("templates/generic"),
            }),
            Some(dir) => Ok(TemplateSet {
                header: read_component(dir, "header.adoc")?,
                introduction: read_component(dir, "introduction.adoc")?,
                synthesis: read_component(dir, "synthesis.adoc")?,
                assets_dir: dir.to_path_buf(),
            }),
        }
    }

    pub fn images_dir(&self) -> PathBuf {
        self.assets_dir.join("resources").join("images")
    }

    pub fn themes_dir(&self) -> PathBuf {
        self.assets_dir.join("resources").join("themes")
    }
}

fn read_component(dir: &Path, name: &'static str) -> Result<String, ReportError> {
    let path = dir.join(name);
    if !path.is_file() {
        return Err(ReportError::MissingTemplateComponent { name, dir: dir.to_path_buf() });
    }
    Ok(fs::read_to_string(path)?)
}

/// Replace every `(token, value)` pair in the template.
pub fn substitute(template: &str, replacements: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (token, value) in replacements {
        out = out.replace(token, value);
    }
    out
}

/// Error out if any placeholder token survived substitution.
pub fn check_resolved(fragment: &str) -> Result<(), ReportError> {
    if let Some(start) = fragment.find(PLACEHOLDER_PREFIX) {
        let token: String = fragment[start..]
            .chars()
            .take_while(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '_')
            .collect();
        return Err(ReportError::UnresolvedPlaceholder(token));
    }
    Ok(())
}
