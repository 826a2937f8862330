use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use docutriage_core::{
    DocumentKind, DocumentRecord, LanguageDetector, OcrTranscriber, PdfBackend, RecordOutcome,
    ScanOptions,
};

use crate::classify_file;

/// Collect the classifiable files under `input_dir`, recursively, in a
/// stable sorted order. Extensions other than `.pdf`/`.docx` are ignored,
/// not errors.
pub fn collect_candidates(input_dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(input_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            matches!(
                p.extension().and_then(|e| e.to_str()).map(str::to_lowercase).as_deref(),
                Some("pdf") | Some("docx")
            )
        })
        .collect();
    files.sort();
    files
}

/// Classify one file into a report row, isolating failures.
///
/// A failed document yields exactly one `error`-kind row; it never aborts
/// the batch and never produces a partial classification.
pub fn scan_file_record(
    input_dir: &Path,
    path: &Path,
    pdf: &dyn PdfBackend,
    ocr: &dyn OcrTranscriber,
    detector: &dyn LanguageDetector,
    opts: &ScanOptions,
) -> DocumentRecord {
    let file = path
        .strip_prefix(input_dir)
        .unwrap_or(path)
        .display()
        .to_string();

    match classify_file(path, pdf, ocr, detector, opts) {
        Ok((kind, classification)) => DocumentRecord {
            file,
            kind,
            outcome: RecordOutcome::Classified(classification),
        },
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "classification failed");
            DocumentRecord {
                file,
                kind: DocumentKind::Error,
                outcome: RecordOutcome::Failed {
                    error: e.to_string(),
                },
            }
        }
    }
}

/// Walk `input_dir` and classify every candidate file, one row each.
///
/// `progress` is called with each file path before it is processed.
pub fn scan_directory(
    input_dir: &Path,
    pdf: &dyn PdfBackend,
    ocr: &dyn OcrTranscriber,
    detector: &dyn LanguageDetector,
    opts: &ScanOptions,
    mut progress: impl FnMut(&Path),
) -> Vec<DocumentRecord> {
    let candidates = collect_candidates(input_dir);
    tracing::info!(dir = %input_dir.display(), files = candidates.len(), "scanning batch");

    let mut records = Vec::with_capacity(candidates.len());
    for path in &candidates {
        progress(path);
        records.push(scan_file_record(input_dir, path, pdf, ocr, detector, opts));
    }
    records
}
