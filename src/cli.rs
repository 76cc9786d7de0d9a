//! Command line interface.

use crate::locale::Lang;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "audit-scribe",
    version,
    about = "Render compliance-audit baselines into a typeset PDF report and an xlsx workbook"
)]
pub struct CliArgs {
    /// Audited baseline results, as JSON
    #[arg(long, value_name = "FILE")]
    pub baseline: PathBuf,

    /// Report metadata (participants, classification, asset), as TOML
    #[arg(long, value_name = "FILE")]
    pub metadata: PathBuf,

    /// Directory the artifacts are written to
    #[arg(long, value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Base name of the generated artifacts
    #[arg(long, value_name = "NAME", default_value = "audit-report")]
    pub filename: String,

    /// Report language
    #[arg(long, value_enum, default_value = "en")]
    pub lang: Lang,

    /// Color and classification configuration override
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Custom template directory holding header/introduction/synthesis fragments
    #[arg(long, value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// Theme file passed to the PDF renderer
    #[arg(long, value_name = "FILE", default_value = "default-theme.yml")]
    pub pdf_theme: String,

    /// List every rule in the document synthesis table, not only non-conformities
    #[arg(long)]
    pub synthesis_all_rules: bool,

    /// Skip the PDF document
    #[arg(long)]
    pub skip_pdf: bool,

    /// Skip the xlsx workbook
    #[arg(long)]
    pub skip_xlsx: bool,
}

impl CliArgs {
    pub fn validate(&self) -> Result<(), String> {
        if self.skip_pdf && self.skip_xlsx {
            return Err("--skip-pdf and --skip-xlsx cannot both be set; nothing would be generated".to_string());
        }
        Ok(())
    }
}
