//! Report metadata: the people and engagement details printed on the cover,
//! the introduction tables and the information worksheet.
//!
//! Loaded once from a TOML file and treated as read-only by both generators.

use crate::error::ReportError;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

fn default_revision() -> String {
    "1.0".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportMetadata {
    pub auditee_name: String,
    /// Semicolon-delimited list, positionally paired with
    /// `auditee_contact_email`.
    pub auditee_contact_full_name: String,
    pub auditee_contact_email: String,
    pub project_manager_full_name: String,
    pub project_manager_email: String,
    /// Semicolon-delimited list, positionally paired with `authors_email`.
    pub authors_full_name: String,
    pub authors_email: String,
    pub audited_asset: String,
    pub classification_level: String,
    pub auditor_company_name: String,
    #[serde(default = "default_revision")]
    pub revision: String,
}

impl ReportMetadata {
    pub fn auditee_contacts(&self) -> Result<Vec<Participant>, ReportError> {
        split_participants(&self.auditee_contact_full_name, &self.auditee_contact_email)
    }

    pub fn authors(&self) -> Result<Vec<Participant>, ReportError> {
        split_participants(&self.authors_full_name, &self.authors_email)
    }
}

/// One name/email pair from a delimited participant list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub full_name: String,
    pub email: String,
}

/// Pair up two semicolon-delimited lists positionally. Differing lengths are
/// a metadata defect and abort generation.
pub fn split_participants(names: &str, emails: &str) -> Result<Vec<Participant>, ReportError> {
    let names: Vec<&str> = split_list(names);
    let emails: Vec<&str> = split_list(emails);

    if names.len() != emails.len() {
        return Err(ReportError::MalformedMetadataList { names: names.len(), emails: emails.len() });
    }

    Ok(names
        .into_iter()
        .zip(emails)
        .map(|(full_name, email)| Participant {
            full_name: full_name.to_string(),
            email: email.to_string(),
        })
        .collect())
}

fn split_list(value: &str) -> Vec<&str> {
    value.split(';').map(str::trim).filter(|part| !part.is_empty()).collect()
}

pub fn load_metadata(path: &Path) -> Result<ReportMetadata, ReportError> {
    debug!("Loading report metadata from {:?}", path);
    let content = fs::read_to_string(path)?;
    let metadata: ReportMetadata =
        toml::from_str(&content).map_err(|source| ReportError::TomlParse { what: "metadata", source })?;

    // Fail on malformed lists at load time, before any artifact exists.
    metadata.auditee_contacts()?;
    metadata.authors()?;

    Ok(metadata)
}

/// Completion date stamped on the artifacts, local time.
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
