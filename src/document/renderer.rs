//! External `asciidoctor-pdf` invocation.
//!
//! The renderer is an optional system dependency: absence or a failed run
//! means "no PDF produced", logged and reported to the caller as `None`,
//! never a fatal error.

use crate::document::templates::TemplateSet;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// True when `asciidoctor-pdf --version` spawns and exits 0.
pub fn is_renderer_available() -> bool {
    Command::new("asciidoctor-pdf")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Run the renderer synchronously over an assembled header file.
///
/// Returns the path of the produced PDF, or `None` when the renderer could
/// not be spawned or exited non-zero.
pub fn render_pdf(
    header_file: &Path,
    output_dir: &Path,
    filename: &str,
    templates: &TemplateSet,
    pdf_theme: &str,
) -> Option<PathBuf> {
    let pdf_name = format!("{}.pdf", filename);

    let mut cmd = Command::new("asciidoctor-pdf");
    cmd.arg("-a")
        .arg(format!("imagesdir={}", templates.images_dir().display()))
        .arg("-a")
        .arg(format!("pdf-themesdir={}", templates.themes_dir().display()))
        .arg("-a")
        .arg(format!("pdf-theme={}", pdf_theme))
        .arg("-D")
        .arg(output_dir)
        .arg("-o")
        .arg(&pdf_name)
        .arg(header_file);

    debug!("Invoking renderer: {:?}", cmd);

    match cmd.stdout(Stdio::piped()).stderr(Stdio::piped()).output() {
        Ok(output) if output.status.success() => Some(output_dir.join(pdf_name)),
        Ok(output) => {
            warn!(
                "asciidoctor-pdf exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            None
        }
        Err(err) => {
            warn!("failed to spawn asciidoctor-pdf: {}", err);
            None
        }
    }
}
