//! Core data model: a baseline of categories, each holding audited rules.
//!
//! The baseline is constructed once upstream (deserialized from JSON) and
//! treated as read-only by both the document and workbook generators.

use serde::{Deserialize, Serialize};

/// Hardening level a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Minimal,
    Intermediary,
    Enhanced,
    High,
}

impl Level {
    /// All levels, in synthesis column order.
    pub const ALL: [Level; 4] = [Level::Minimal, Level::Intermediary, Level::Enhanced, Level::High];

    /// Localization key for this level.
    pub fn as_key(&self) -> &'static str {
        match self {
            Level::Minimal => "minimal",
            Level::Intermediary => "intermediary",
            Level::Enhanced => "enhanced",
            Level::High => "high",
        }
    }
}

/// Severity of a non-conformity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Localization key for this severity.
    pub fn as_key(&self) -> &'static str {
        match self {
            Severity::Low => "severity_low",
            Severity::Medium => "severity_medium",
            Severity::High => "severity_high",
            Severity::Critical => "severity_critical",
        }
    }
}

/// A single audited rule with its verdict and the terminal transcripts
/// backing it. The transcript fields (`check`, `expected`, `output`) are
/// rendered verbatim and never escaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub title: String,
    pub description: String,
    pub level: Level,
    pub severity: Severity,
    pub compliant: bool,
    pub check: String,
    pub expected: String,
    pub output: String,
    /// Used only when the rule is non-compliant.
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub references: Vec<String>,
}

/// A category of rules. `id` is a stable slug used as document anchor;
/// `name` is free display text and may exceed worksheet-name limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub rules: Vec<Rule>,
}

/// The full audit result set consumed by both generators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub title: String,
    pub categories: Vec<Category>,
}

impl Baseline {
    /// Total number of rules across all categories.
    pub fn rule_count(&self) -> usize {
        self.categories.iter().map(|c| c.rules.len()).sum()
    }
}
