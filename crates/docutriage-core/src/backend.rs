use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::PageLanguage;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open document: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("failed to rasterize page: {0}")]
    RasterError(String),
    #[error("OCR error: {0}")]
    OcrError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for PDF access backends.
///
/// Implementors provide the low-level page operations; the triage pipeline
/// (strategy selection, OCR page policy, classification) lives in
/// `docutriage-ingest` and `docutriage-core`.
pub trait PdfBackend: Send + Sync {
    /// Number of pages in the document, if it can be determined.
    fn page_count(&self, path: &Path) -> Result<usize, BackendError>;

    /// Extract embedded text per page, in order. A page that yields no text
    /// produces an empty string, never an error — empty pages are evidence
    /// of a scanned document, not a failure.
    ///
    /// `max_pages` bounds the work for sampling; `None` extracts every page.
    fn extract_page_texts(
        &self,
        path: &Path,
        max_pages: Option<usize>,
    ) -> Result<Vec<String>, BackendError>;

    /// Rasterize the contiguous 1-based page range `first..=last` to PNG
    /// files under `out_dir`, returning the image paths in page order.
    fn rasterize_range(
        &self,
        path: &Path,
        first: usize,
        last: usize,
        dpi: u32,
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>, BackendError>;
}

/// A statistical language-detection capability, restricted to the tracked
/// language set.
///
/// Must be deterministic for identical input and side-effect free. Returns
/// `None` when no tracked language dominates; callers handle the short-text
/// gate themselves (see [`crate::classify_page`]).
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> Option<PageLanguage>;
}

/// A multilingual OCR capability applied to one rasterized page at a time.
///
/// Output is best effort: a low-confidence or blank page comes back as an
/// empty (or near-empty) string and feeds the unknown-language path, it is
/// not an error.
pub trait OcrTranscriber: Send + Sync {
    fn transcribe(&self, image: &Path) -> Result<String, BackendError>;
}
