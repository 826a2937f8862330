use std::path::Path;

use thiserror::Error;

pub mod batch;

// Re-export domain types for convenience
pub use docutriage_core::{
    Classification, DocumentKind, DocumentRecord, RecordOutcome, ScanOptions,
};
// Re-export batch API
pub use batch::{collect_candidates, scan_directory, scan_file_record};

use docutriage_core::{
    LanguageDetector, OcrTranscriber, PdfBackend, aggregate, analyze_pages, is_mostly_empty,
    select_ocr_pages,
};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("unsupported format: .{0}")]
    UnsupportedFormat(String),
    #[error("PDF error: {0}")]
    Pdf(#[from] docutriage_core::BackendError),
    #[error("docx error: {0}")]
    Docx(#[from] docutriage_docx::DocxError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The ordered page texts of one document, plus how they were obtained.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub kind: DocumentKind,
    pub pages: Vec<String>,
}

/// Pull page texts out of a file of unknown internal structure.
///
/// Dispatches on extension:
/// - `.docx` → paragraph text chunked into fixed-size pseudo-pages
/// - `.pdf`  → a cheap 2-page sample decides text-native vs scanned; scanned
///   PDFs go through the bounded OCR path
/// - anything else → [`IngestError::UnsupportedFormat`]
pub fn extract_pages(
    path: &Path,
    pdf: &dyn PdfBackend,
    ocr: &dyn OcrTranscriber,
    opts: &ScanOptions,
) -> Result<ExtractedDocument, IngestError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "docx" => {
            let text = docutriage_docx::extract_text(path)?;
            Ok(ExtractedDocument {
                kind: DocumentKind::Docx,
                pages: chunk_text(&text, opts.docx_window_chars),
            })
        }
        "pdf" => extract_pdf(path, pdf, ocr, opts),
        other => Err(IngestError::UnsupportedFormat(other.to_string())),
    }
}

/// Classify one file end to end: extract pages, label them, reduce to a
/// document verdict.
pub fn classify_file(
    path: &Path,
    pdf: &dyn PdfBackend,
    ocr: &dyn OcrTranscriber,
    detector: &dyn LanguageDetector,
    opts: &ScanOptions,
) -> Result<(DocumentKind, Classification), IngestError> {
    let doc = extract_pages(path, pdf, ocr, opts)?;
    let analysis = analyze_pages(&doc.pages, detector, opts.min_detect_chars);
    let classification = aggregate(&analysis);
    tracing::debug!(
        file = %path.display(),
        kind = doc.kind.as_str(),
        pages = doc.pages.len(),
        overall = classification.overall.map(|l| l.as_str()).unwrap_or("UNKNOWN"),
        likely_translation = classification.likely_translation,
        "classified"
    );
    Ok((doc.kind, classification))
}

fn extract_pdf(
    path: &Path,
    pdf: &dyn PdfBackend,
    ocr: &dyn OcrTranscriber,
    opts: &ScanOptions,
) -> Result<ExtractedDocument, IngestError> {
    // Sampling gate: only the first couple of pages decide the strategy, so
    // text-native PDFs never pay for rasterization.
    let sample = pdf.extract_page_texts(path, Some(opts.sample_pages))?;
    if is_mostly_empty(&sample, opts.text_threshold) {
        tracing::debug!(file = %path.display(), "sample mostly empty, treating as scanned");
        let pages = ocr_pdf_pages(path, pdf, ocr, opts)?;
        Ok(ExtractedDocument {
            kind: DocumentKind::PdfOcr,
            pages,
        })
    } else {
        let pages = pdf.extract_page_texts(path, None)?;
        Ok(ExtractedDocument {
            kind: DocumentKind::PdfText,
            pages,
        })
    }
}

/// OCR the bounded head+tail page set of a scanned PDF.
///
/// The rasterizer works on one contiguous range, so the minimal range
/// covering the selected set is rendered and non-selected pages in the
/// middle are dropped before transcription.
fn ocr_pdf_pages(
    path: &Path,
    pdf: &dyn PdfBackend,
    ocr: &dyn OcrTranscriber,
    opts: &ScanOptions,
) -> Result<Vec<String>, IngestError> {
    let page_count = pdf.page_count(path).ok();
    let selected = select_ocr_pages(page_count, opts.ocr_first_pages, opts.ocr_last_pages);
    let (Some(&first), Some(&last)) = (selected.first(), selected.last()) else {
        return Ok(Vec::new());
    };

    let raster_dir = tempfile::tempdir()?;
    let images = pdf.rasterize_range(path, first, last, opts.ocr_dpi, raster_dir.path())?;

    let mut pages = Vec::with_capacity(selected.len());
    for &page_no in &selected {
        let Some(image) = images.get(page_no - first) else {
            continue;
        };
        // A failed transcription degrades to an empty page, which feeds the
        // unknown-language path; no per-page error is surfaced.
        let text = match ocr.transcribe(image) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(file = %path.display(), page = page_no, error = %e, "OCR failed");
                String::new()
            }
        };
        pages.push(text);
    }
    Ok(pages)
}

/// Slice text into fixed-size character windows, each one a pseudo-page.
/// Window boundaries ignore paragraph structure; that is an accepted
/// approximation for formats with no native pagination.
pub fn chunk_text(text: &str, window: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(window.max(1))
        .map(|c| c.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use docutriage_core::{BackendError, PageLanguage};

    /// Scripted PDF backend: serves fixed per-page texts regardless of the
    /// file path, and writes stub image files when asked to rasterize.
    pub(crate) struct StubPdf {
        pub pages: Vec<String>,
    }

    impl StubPdf {
        pub fn with_pages<S: Into<String>>(pages: Vec<S>) -> Self {
            Self {
                pages: pages.into_iter().map(Into::into).collect(),
            }
        }
    }

    impl PdfBackend for StubPdf {
        fn page_count(&self, _path: &Path) -> Result<usize, BackendError> {
            Ok(self.pages.len())
        }

        fn extract_page_texts(
            &self,
            _path: &Path,
            max_pages: Option<usize>,
        ) -> Result<Vec<String>, BackendError> {
            let limit = max_pages.unwrap_or(self.pages.len());
            Ok(self.pages.iter().take(limit).cloned().collect())
        }

        fn rasterize_range(
            &self,
            _path: &Path,
            first: usize,
            last: usize,
            _dpi: u32,
            out_dir: &Path,
        ) -> Result<Vec<PathBuf>, BackendError> {
            let mut out = Vec::new();
            for page_no in first..=last.min(self.pages.len()) {
                let p = out_dir.join(format!("page-{page_no:04}.png"));
                std::fs::write(&p, page_no.to_string())?;
                out.push(p);
            }
            Ok(out)
        }
    }

    /// OCR stub that returns the rendered page number as its transcript and
    /// counts invocations.
    pub(crate) struct StubOcr {
        pub calls: AtomicUsize,
    }

    impl StubOcr {
        pub fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl OcrTranscriber for StubOcr {
        fn transcribe(&self, image: &Path) -> Result<String, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("ocr page {}", std::fs::read_to_string(image)?))
        }
    }

    struct NeverDetects;

    impl LanguageDetector for NeverDetects {
        fn detect(&self, _text: &str) -> Option<PageLanguage> {
            None
        }
    }

    fn long_page() -> String {
        "embedded page text ".repeat(40)
    }

    #[test]
    fn test_text_native_pdf_never_invokes_ocr() {
        let page = long_page();
        let pdf = StubPdf::with_pages(vec![page.as_str(); 3]);
        let ocr = StubOcr::new();
        let doc =
            extract_pages(Path::new("doc.pdf"), &pdf, &ocr, &ScanOptions::default()).unwrap();
        assert_eq!(doc.kind, DocumentKind::PdfText);
        assert_eq!(doc.pages.len(), 3);
        assert_eq!(ocr.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_scanned_pdf_ocrs_head_and_tail() {
        let empty = vec![""; 10];
        let pdf = StubPdf::with_pages(empty);
        let ocr = StubOcr::new();
        let doc =
            extract_pages(Path::new("scan.pdf"), &pdf, &ocr, &ScanOptions::default()).unwrap();
        assert_eq!(doc.kind, DocumentKind::PdfOcr);
        // Defaults F=3, L=2 over 10 pages select {1,2,3,9,10}.
        assert_eq!(
            doc.pages,
            vec![
                "ocr page 1",
                "ocr page 2",
                "ocr page 3",
                "ocr page 9",
                "ocr page 10"
            ]
        );
        assert_eq!(ocr.calls.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_short_scanned_pdf_dedupes_selection() {
        let pdf = StubPdf::with_pages(vec![""; 4]);
        let ocr = StubOcr::new();
        let doc =
            extract_pages(Path::new("scan.pdf"), &pdf, &ocr, &ScanOptions::default()).unwrap();
        assert_eq!(doc.pages.len(), 4);
        assert_eq!(ocr.calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_sampling_gate_at_threshold_stays_text_native() {
        // Exactly 400 normalized chars across the 2-page sample.
        let page1 = "x".repeat(400);
        let pdf = StubPdf::with_pages(vec![page1.as_str(), "", ""]);
        let ocr = StubOcr::new();
        let doc =
            extract_pages(Path::new("doc.pdf"), &pdf, &ocr, &ScanOptions::default()).unwrap();
        assert_eq!(doc.kind, DocumentKind::PdfText);
        assert_eq!(ocr.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unsupported_extension() {
        let pdf = StubPdf::with_pages(Vec::<&str>::new());
        let ocr = StubOcr::new();
        let err = extract_pages(Path::new("notes.txt"), &pdf, &ocr, &ScanOptions::default())
            .unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat(ext) if ext == "txt"));
    }

    #[test]
    fn test_classify_file_counts_cover_all_pages() {
        let pdf = StubPdf::with_pages(vec![""; 10]);
        let ocr = StubOcr::new();
        let (kind, c) = classify_file(
            Path::new("scan.pdf"),
            &pdf,
            &ocr,
            &NeverDetects,
            &ScanOptions::default(),
        )
        .unwrap();
        assert_eq!(kind, DocumentKind::PdfOcr);
        // 5 selected pages, all too short to classify.
        assert_eq!(c.unknown_pages, 5);
        assert_eq!(c.total_pages(), 5);
        assert_eq!(c.overall, None);
    }

    #[test]
    fn test_classify_file_is_idempotent() {
        let page = long_page();
        let pdf = StubPdf::with_pages(vec![page.as_str(); 2]);
        let ocr = StubOcr::new();
        let opts = ScanOptions::default();
        let first = classify_file(Path::new("a.pdf"), &pdf, &ocr, &NeverDetects, &opts).unwrap();
        let second = classify_file(Path::new("a.pdf"), &pdf, &ocr, &NeverDetects, &opts).unwrap();
        assert_eq!(first.1, second.1);
    }

    #[test]
    fn test_chunk_text_windows() {
        let chunks = chunk_text(&"ab".repeat(3000), 2500);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chars().count(), 2500);
        assert_eq!(chunks[1].chars().count(), 2500);
        assert_eq!(chunks[2].chars().count(), 1000);
    }

    #[test]
    fn test_chunk_text_counts_chars_not_bytes() {
        let text = "ї".repeat(2501);
        let chunks = chunk_text(&text, 2500);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1], "ї");
    }

    #[test]
    fn test_chunk_text_empty() {
        assert!(chunk_text("", 2500).is_empty());
    }
}
