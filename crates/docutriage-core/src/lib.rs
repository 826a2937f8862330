use serde::{Deserialize, Serialize};

pub mod aggregate;
pub mod backend;
pub mod config_file;
pub mod cues;
pub mod sampling;
pub mod text;

// Re-export for convenience
pub use aggregate::{Classification, PageAnalysis, aggregate, analyze_pages};
pub use backend::{BackendError, LanguageDetector, OcrTranscriber, PdfBackend};
pub use cues::has_translation_cue;
pub use sampling::{is_mostly_empty, select_ocr_pages};
pub use text::normalize;

/// One of the languages this system tracks. Anything else the detector
/// might recognize is collapsed to "unknown" (`None` in a page label).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageLanguage {
    English,
    Russian,
    Ukrainian,
}

impl PageLanguage {
    /// Enumeration order used for argmax tie-breaking in [`aggregate`].
    pub const ALL: [PageLanguage; 3] = [
        PageLanguage::English,
        PageLanguage::Russian,
        PageLanguage::Ukrainian,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageLanguage::English => "ENGLISH",
            PageLanguage::Russian => "RUSSIAN",
            PageLanguage::Ukrainian => "UKRAINIAN",
        }
    }
}

/// How a document's pages were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    /// PDF with embedded text, every page extracted directly.
    PdfText,
    /// Image-only PDF, a bounded page subset transcribed via OCR.
    PdfOcr,
    /// Word-processor document chunked into pseudo-pages.
    Docx,
    /// Extraction or classification failed; no pages were produced.
    Error,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::PdfText => "pdf-text",
            DocumentKind::PdfOcr => "pdf-ocr",
            DocumentKind::Docx => "docx",
            DocumentKind::Error => "error",
        }
    }
}

/// Tunable knobs for one scan run.
///
/// Defaults mirror the triage policy this tool was built around: OCR only a
/// handful of head/tail pages, gate the detector on a minimum of usable text,
/// and approximate docx pagination with fixed character windows.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// How many leading PDF pages to sample when deciding text vs scanned.
    pub sample_pages: usize,
    /// Normalized character sum below which the sample counts as "mostly
    /// empty", routing the PDF to OCR.
    pub text_threshold: usize,
    /// Rasterization resolution for OCR input.
    pub ocr_dpi: u32,
    /// Head pages to OCR.
    pub ocr_first_pages: usize,
    /// Tail pages to OCR.
    pub ocr_last_pages: usize,
    /// Normalized character count below which a page classifies as unknown
    /// without consulting the detector.
    pub min_detect_chars: usize,
    /// Synthetic page window (in characters) for word-processor documents.
    pub docx_window_chars: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            sample_pages: 2,
            text_threshold: 400,
            ocr_dpi: 200,
            ocr_first_pages: 3,
            ocr_last_pages: 2,
            min_detect_chars: 60,
            docx_window_chars: 2500,
        }
    }
}

/// One report row: a fully classified document or an isolated failure,
/// never a mix.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRecord {
    /// Path relative to the batch input directory.
    pub file: String,
    pub kind: DocumentKind,
    pub outcome: RecordOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOutcome {
    Classified(Classification),
    Failed { error: String },
}

/// Classify one page of text.
///
/// Normalizes first; pages shorter than `min_chars` are unknown without a
/// detector call (short snippets are unreliable signal). Detector labels
/// outside the tracked set come back as `None` from the trait already.
pub fn classify_page(
    detector: &dyn LanguageDetector,
    text: &str,
    min_chars: usize,
) -> Option<PageLanguage> {
    let normalized = normalize(text);
    if normalized.chars().count() < min_chars {
        return None;
    }
    detector.detect(&normalized)
}
