use std::path::Path;

use tesseract::{OcrEngineMode, Tesseract};

use docutriage_core::{BackendError, OcrTranscriber};

/// Default language pack spec covering the three tracked languages.
pub const DEFAULT_LANGUAGES: &str = "eng+rus+ukr";

/// Page segmentation mode 6: assume a single uniform block of text. Scanned
/// filings are dense paragraph pages, not sparse layouts.
const PAGE_SEG_MODE: &str = "6";

/// Engine mode 1: LSTM only. Must be fixed at init time; `set_variable`
/// cannot change it after the engine is built.
fn engine_mode() -> OcrEngineMode {
    OcrEngineMode::LstmOnly
}

/// Tesseract-backed implementation of [`OcrTranscriber`].
///
/// A fresh engine instance is created per page image; `recognize` consumes
/// the handle, so pages are transcribed fully independently.
pub struct TesseractTranscriber {
    languages: String,
    tessdata_dir: Option<String>,
}

impl TesseractTranscriber {
    pub fn new() -> Self {
        Self {
            languages: DEFAULT_LANGUAGES.to_string(),
            tessdata_dir: None,
        }
    }

    /// Override the language pack spec (tesseract `+`-joined codes).
    pub fn with_languages(mut self, languages: impl Into<String>) -> Self {
        self.languages = languages.into();
        self
    }

    /// Point at an explicit tessdata directory instead of the system default.
    pub fn with_tessdata_dir(mut self, dir: impl Into<String>) -> Self {
        self.tessdata_dir = Some(dir.into());
        self
    }
}

impl Default for TesseractTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrTranscriber for TesseractTranscriber {
    fn transcribe(&self, image: &Path) -> Result<String, BackendError> {
        let image_str = image
            .to_str()
            .ok_or_else(|| BackendError::OcrError("invalid image path encoding".into()))?;

        tracing::debug!(image = %image.display(), lang = %self.languages, "transcribing page");

        let text = Tesseract::new_with_oem(
            self.tessdata_dir.as_deref(),
            Some(&self.languages),
            engine_mode(),
        )
        .map_err(|e| BackendError::OcrError(format!("init: {e}")))?
        .set_variable("tessedit_pageseg_mode", PAGE_SEG_MODE)
        .map_err(|e| BackendError::OcrError(format!("set psm: {e}")))?
        .set_image(image_str)
        .map_err(|e| BackendError::OcrError(format!("set image: {e}")))?
        .recognize()
        .map_err(|e| BackendError::OcrError(format!("recognize: {e}")))?
        .get_text()
        .map_err(|e| BackendError::OcrError(format!("get text: {e}")))?;

        Ok(text)
    }
}
