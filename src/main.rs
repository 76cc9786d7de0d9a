mod baseline;
mod cli;
mod config;
mod document;
mod error;
mod locale;
mod metadata;
mod sanitize;
mod types;
mod workbook;
mod xl;

use clap::Parser;
use document::fragments::SynthesisScope;
use document::templates::TemplateSet;
use error::ReportError;
use locale::Locale;
use log::info;
use std::fs;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const REPO_URL: &str = env!("CARGO_PKG_REPOSITORY");

fn main() {
    env_logger::init();

    let args = cli::CliArgs::parse();
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &cli::CliArgs) -> Result<(), ReportError> {
    let config = config::load_config(args.config.as_deref())?;
    let baseline = baseline::load_baseline(&args.baseline)?;
    let report_metadata = metadata::load_metadata(&args.metadata)?;
    let locale = Locale::new(args.lang);

    fs::create_dir_all(&args.output_dir)?;
    info!(
        "Generating report '{}' for baseline '{}' ({} rules)",
        args.filename,
        baseline.title,
        baseline.rule_count()
    );

    if !args.skip_pdf {
        let template_set = TemplateSet::load(args.template_dir.as_deref())?;
        let options = document::DocumentOptions {
            filename: &args.filename,
            pdf_theme: &args.pdf_theme,
            scope: if args.synthesis_all_rules {
                SynthesisScope::AllRules
            } else {
                SynthesisScope::NonCompliantOnly
            },
            tool_version: VERSION,
            repo_url: REPO_URL,
        };

        match document::generate_document(
            &baseline,
            &report_metadata,
            &locale,
            &template_set,
            &options,
            &args.output_dir,
        )? {
            Some(pdf) => println!("PDF report saved to: {}", pdf.display()),
            None => eprintln!("Warning: no PDF produced (asciidoctor-pdf unavailable or failed)"),
        }
    }

    if !args.skip_xlsx {
        let workbook_path = workbook::generate_workbook(
            &baseline,
            &report_metadata,
            &locale,
            &config,
            &args.output_dir,
            &args.filename,
            VERSION,
            REPO_URL,
        )?;
        println!("Workbook saved to: {}", workbook_path.display());

        // Unconditional closing step of the workbook path.
        let compat_path =
            workbook::compat::write_compat_workbook(&workbook_path, locale.gettext("summary"))?;
        println!("Compatibility workbook saved to: {}", compat_path.display());
    }

    Ok(())
}
