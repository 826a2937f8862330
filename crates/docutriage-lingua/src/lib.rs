use lingua::{Language, LanguageDetector, LanguageDetectorBuilder};

use docutriage_core::PageLanguage;

/// Statistical detector restricted to the three tracked languages.
///
/// Building the lingua models is the expensive part, so construct this once
/// at process start and pass it by reference into the pipeline; detection
/// itself is a pure function of the input text.
pub struct LinguaDetector {
    detector: LanguageDetector,
}

impl LinguaDetector {
    pub fn new() -> Self {
        tracing::debug!("building lingua detector for en/ru/uk");
        let detector = LanguageDetectorBuilder::from_languages(&[
            Language::English,
            Language::Russian,
            Language::Ukrainian,
        ])
        .build();
        Self { detector }
    }
}

impl Default for LinguaDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl docutriage_core::LanguageDetector for LinguaDetector {
    fn detect(&self, text: &str) -> Option<PageLanguage> {
        // Any label outside the tracked set (possible if the detector is
        // rebuilt with a wider language list) maps to unknown.
        match self.detector.detect_language_of(text)? {
            Language::English => Some(PageLanguage::English),
            Language::Russian => Some(PageLanguage::Russian),
            Language::Ukrainian => Some(PageLanguage::Ukrainian),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }
}
