//! PDF text extraction utility.

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::Document;
use tracing::{error, info};

use llmbatch_protocols::error::BatchError;

/// Separator between extracted pages, matching the form-feed convention of
/// classic text extraction tools.
const PAGE_SEPARATOR: char = '\u{c}';

/// Extract text from every `*.pdf` file directly inside `in_dir`, writing
/// one `<stem>.txt` per document into `out_dir`.
///
/// `start..=end` is an inclusive zero-based page range. A document that
/// fails to parse is logged and skipped. Returns the number of documents
/// extracted.
pub fn extract_dir(
    in_dir: &Path,
    out_dir: &Path,
    start: u32,
    end: u32,
) -> Result<usize, BatchError> {
    if end < start {
        return Err(BatchError::Precondition(format!(
            "end page {end} is before start page {start}"
        )));
    }
    if !in_dir.is_dir() {
        return Err(BatchError::Precondition(format!(
            "input directory {} does not exist",
            in_dir.display()
        )));
    }
    fs::create_dir_all(out_dir)?;

    let mut pdf_files: Vec<PathBuf> = fs::read_dir(in_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "pdf"))
        .collect();
    pdf_files.sort();

    let mut extracted = 0;
    for pdf in &pdf_files {
        info!("extracting text from: {}", pdf.display());
        match extract_file(pdf, start, end) {
            Ok(text) => {
                let stem = pdf.file_stem().map(|s| s.to_string_lossy().into_owned());
                let Some(stem) = stem else { continue };
                fs::write(out_dir.join(format!("{stem}.txt")), text)?;
                extracted += 1;
            }
            Err(e) => {
                error!("failed to extract {}: {}", pdf.display(), e);
                continue;
            }
        }
    }

    Ok(extracted)
}

/// Extract the selected page range of one document, pages joined with a
/// form-feed character.
fn extract_file(path: &Path, start: u32, end: u32) -> Result<String, lopdf::Error> {
    let doc = Document::load(path)?;

    // get_pages keys are 1-based; the range is zero-based like the CLI.
    let selected: Vec<u32> = doc
        .get_pages()
        .keys()
        .copied()
        .filter(|page| {
            let zero_based = page - 1;
            start <= zero_based && zero_based <= end
        })
        .collect();

    let mut pages = Vec::with_capacity(selected.len());
    for page in selected {
        pages.push(doc.extract_text(&[page])?);
    }
    Ok(pages.join(&PAGE_SEPARATOR.to_string()))
}

#[cfg(test)]
#[path = "pdf_tests.rs"]
mod tests;
