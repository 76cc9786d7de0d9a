//! Error taxonomy for report generation.
//!
//! Template and metadata problems abort generation before any artifact is
//! touched; I/O and workbook errors propagate unrecovered to the caller.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// A required fragment template is absent for the selected template variant.
    #[error("missing template component '{name}' in {dir}")]
    MissingTemplateComponent { name: &'static str, dir: PathBuf },

    /// A placeholder token survived substitution and would leak into the
    /// rendered document.
    #[error("unresolved placeholder '{0}' left in generated fragment")]
    UnresolvedPlaceholder(String),

    /// Paired name/email lists in the report metadata differ in length.
    #[error("participant lists differ in length: {names} name(s) vs {emails} email(s)")]
    MalformedMetadataList { names: usize, emails: usize },

    /// Category ids are used as document anchors and must be unique.
    #[error("duplicate category id '{0}' in baseline")]
    DuplicateCategoryId(String),

    #[error("failed to parse baseline: {0}")]
    BaselineParse(#[from] serde_json::Error),

    #[error("failed to parse {what}: {source}")]
    TomlParse {
        what: &'static str,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid color value '{0}' in configuration")]
    InvalidColor(String),

    #[error("workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("workbook container error: {0}")]
    Container(#[from] zip::result::ZipError),

    #[error("malformed workbook xml: {0}")]
    WorkbookXml(#[from] quick_xml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
