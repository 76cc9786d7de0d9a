//! Compatibility rewrite of the produced workbook.
//!
//! Some strict spreadsheet consumers reject the canonical form of the
//! synthesis formulas (semicolon argument separators, raw quote characters).
//! This pass unpacks the container, rewrites exactly the counting-aggregate
//! formula nodes on the synthesis sheet, and repacks everything else
//! byte-for-byte into a sibling `<name>-compat.xlsx`. Cached results stay
//! empty so the consumer recalculates on open.

use crate::error::ReportError;
use log::debug;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const COMPAT_SUFFIX: &str = "-compat";

/// Produce `<stem>-compat.xlsx` next to the given workbook.
///
/// Idempotent: running the pass on its own output changes nothing, and a
/// workbook without matching formulas is repacked untouched.
pub fn write_compat_workbook(
    workbook_path: &Path,
    synthesis_sheet_name: &str,
) -> Result<PathBuf, ReportError> {
    let scratch = tempfile::tempdir()?;
    let entries = unpack(workbook_path, scratch.path())?;

    let workbook_xml = fs::read_to_string(scratch.path().join("xl").join("workbook.xml"))?;
    if let Some(part) = synthesis_part_name(&workbook_xml, synthesis_sheet_name)? {
        let part_path = scratch.path().join(&part);
        if part_path.is_file() {
            let sheet_xml = fs::read_to_string(&part_path)?;
            fs::write(&part_path, rewrite_formulas(&sheet_xml))?;
        }
    } else {
        debug!("no sheet named {:?} in {:?}", synthesis_sheet_name, workbook_path);
    }

    let compat = compat_path(workbook_path);
    repack(&entries, scratch.path(), &compat)?;
    Ok(compat)
}

fn compat_path(workbook_path: &Path) -> PathBuf {
    let stem = workbook_path.file_stem().and_then(|stem| stem.to_str()).unwrap_or("workbook");
    workbook_path.with_file_name(format!("{}{}.xlsx", stem, COMPAT_SUFFIX))
}

/// Extract the container, returning entry names in archive order.
fn unpack(workbook_path: &Path, scratch: &Path) -> Result<Vec<String>, ReportError> {
    let file = fs::File::open(workbook_path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;

    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let Some(relative) = entry.enclosed_name() else {
            continue;
        };
        let target = scratch.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = fs::File::create(&target)?;
            std::io::copy(&mut entry, &mut out)?;
        }
        entries.push(entry.name().to_string());
    }

    Ok(entries)
}

/// Rebuild the container with the entries in their original order.
fn repack(entries: &[String], scratch: &Path, target: &Path) -> Result<(), ReportError> {
    let out = fs::File::create(target)?;
    let mut writer = ZipWriter::new(BufWriter::new(out));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for name in entries {
        if name.ends_with('/') {
            writer.add_directory(name.trim_end_matches('/'), options)?;
        } else {
            writer.start_file(name.as_str(), options)?;
            let mut part = fs::File::open(scratch.join(name))?;
            std::io::copy(&mut part, &mut writer)?;
        }
    }

    writer.finish()?;
    Ok(())
}

/// Resolve the synthesis sheet's part name from the workbook manifest.
/// Sheet parts are numbered in declaration order.
fn synthesis_part_name(
    workbook_xml: &str,
    sheet_name: &str,
) -> Result<Option<String>, ReportError> {
    let mut reader = Reader::from_str(workbook_xml);
    let mut position = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(element) | Event::Empty(element)
                if element.local_name().as_ref() == b"sheet" =>
            {
                position += 1;
                let found = element.attributes().flatten().any(|attr| {
                    attr.key.local_name().as_ref() == b"name"
                        && attr.unescape_value().map(|value| value == sheet_name).unwrap_or(false)
                });
                if found {
                    return Ok(Some(format!("xl/worksheets/sheet{}.xml", position)));
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// Rewrite every counting-aggregate `<f>` node with an empty cached value;
/// everything else passes through byte-for-byte.
fn rewrite_formulas(sheet_xml: &str) -> String {
    let mut out = String::with_capacity(sheet_xml.len());
    let mut rest = sheet_xml;

    while let Some(open) = rest.find("<f>") {
        let body_start = open + "<f>".len();
        let Some(close) = rest[body_start..].find("</f>") else {
            break;
        };
        let formula = &rest[body_start..body_start + close];
        let tail = &rest[body_start + close..];

        out.push_str(&rest[..body_start]);
        match compat_formula(formula) {
            Some(rewritten) if cached_value_is_empty(tail) => out.push_str(&rewritten),
            _ => out.push_str(formula),
        }
        rest = tail;
    }

    out.push_str(rest);
    out
}

/// A formula cell's cached value, up to the closing `</c>`, is empty when
/// the `<v>` node is absent or holds no text.
fn cached_value_is_empty(cell_tail: &str) -> bool {
    let scope = match cell_tail.find("</c>") {
        Some(end) => &cell_tail[..end],
        None => cell_tail,
    };
    if scope.contains("<v/>") {
        return true;
    }
    match scope.find("<v>") {
        None => true,
        Some(start) => scope[start + "<v>".len()..].starts_with("</v>"),
    }
}

/// Match the counting-aggregate shape (two quoted sheet-qualified ranges,
/// each followed by a quoted text criterion) and produce the rewritten
/// serialized text: `,` separators, `&quot;`-escaped quotes.
///
/// Already-rewritten formulas have no `;` left and fall out of the match,
/// which is what makes the whole pass idempotent.
fn compat_formula(formula: &str) -> Option<String> {
    let normalized = formula.replace("&quot;", "\"");
    let inner = normalized.strip_prefix("COUNTIFS(")?.strip_suffix(')')?;

    let args: Vec<&str> = split_top_level(inner);
    if args.len() != 4 {
        return None;
    }

    let is_sheet_range = |arg: &str| {
        let arg = arg.trim();
        arg.starts_with('\'') && arg.contains("'!") && arg.contains(':')
    };
    let is_text_criterion = |arg: &str| {
        let arg = arg.trim();
        arg.len() >= 2 && arg.starts_with('"') && arg.ends_with('"')
    };

    if !is_sheet_range(args[0])
        || !is_text_criterion(args[1])
        || !is_sheet_range(args[2])
        || !is_text_criterion(args[3])
    {
        return None;
    }

    let joined: Vec<&str> = args.iter().map(|arg| arg.trim()).collect();
    Some(format!("COUNTIFS({})", joined.join(",")).replace('"', "&quot;"))
}

/// Split on `;` outside single- and double-quoted spans.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_double = false;
    let mut in_single = false;

    for (i, c) in s.char_indices() {
        match c {
            '"' if !in_single => in_double = !in_double,
            '\'' if !in_double => in_single = !in_single,
            ';' if !in_double && !in_single => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

#[cfg(test)]
#[path = "compat_test.rs"]
mod compat_test;
