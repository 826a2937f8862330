use serde::{Deserialize, Serialize};

use crate::backend::LanguageDetector;
use crate::cues::has_translation_cue;
use crate::text::normalize;
use crate::{PageLanguage, classify_page};

/// Per-page labels and the document-level cue flag, produced by one pass
/// over the extracted page texts.
#[derive(Debug, Clone)]
pub struct PageAnalysis {
    /// One label per page, in page order. `None` is unknown.
    pub labels: Vec<Option<PageLanguage>>,
    /// True if any page matched a translation cue.
    pub any_cue: bool,
}

/// The document-level verdict reduced from a [`PageAnalysis`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Tracked language with the highest page count; `None` iff all three
    /// counts are zero.
    pub overall: Option<PageLanguage>,
    pub en_pages: usize,
    pub ru_pages: usize,
    pub ua_pages: usize,
    pub unknown_pages: usize,
    pub likely_translation: bool,
    /// Comma-joined heuristic tags; empty when nothing fired.
    pub notes: String,
}

impl Classification {
    pub fn total_pages(&self) -> usize {
        self.en_pages + self.ru_pages + self.ua_pages + self.unknown_pages
    }
}

/// Label every page and scan for cues.
///
/// Blank pages (nothing survives normalization) are unknown without a
/// detector or cue check; this is where empty OCR output and failed page
/// extractions land.
pub fn analyze_pages(
    pages: &[String],
    detector: &dyn LanguageDetector,
    min_detect_chars: usize,
) -> PageAnalysis {
    let mut labels = Vec::with_capacity(pages.len());
    let mut any_cue = false;
    for page in pages {
        let normalized = normalize(page);
        if normalized.is_empty() {
            labels.push(None);
            continue;
        }
        any_cue = any_cue || has_translation_cue(&normalized);
        labels.push(classify_page(detector, &normalized, min_detect_chars));
    }
    PageAnalysis { labels, any_cue }
}

/// Reduce per-page labels to one document verdict.
///
/// The language tally and the translation-ordering scan are deliberately two
/// independent passes over the label sequence: the ordering scan terminates
/// at its first confirmation, and fusing it with the tally would under-count
/// pages after that point.
pub fn aggregate(analysis: &PageAnalysis) -> Classification {
    let en_pages = count_label(analysis, PageLanguage::English);
    let ru_pages = count_label(analysis, PageLanguage::Russian);
    let ua_pages = count_label(analysis, PageLanguage::Ukrainian);
    let unknown_pages = analysis.labels.iter().filter(|l| l.is_none()).count();

    // Argmax over the tracked languages. A strict `>` keeps the first
    // language in enumeration order on ties and leaves `None` when all
    // three counts are zero.
    let mut overall = None;
    let mut best = 0;
    for &lang in &PageLanguage::ALL {
        let count = count_label(analysis, lang);
        if count > best {
            best = count;
            overall = Some(lang);
        }
    }

    // Ordering heuristic: a Russian/Ukrainian page followed (not
    // necessarily adjacently) by an English page marks a probable
    // original-plus-translation bundle. Unknown pages do not break the scan.
    let mut saw_non_en = false;
    let mut likely_translation = false;
    for label in &analysis.labels {
        if matches!(
            label,
            Some(PageLanguage::Russian) | Some(PageLanguage::Ukrainian)
        ) {
            saw_non_en = true;
        }
        if saw_non_en && *label == Some(PageLanguage::English) {
            likely_translation = true;
            break;
        }
    }

    // Cue words are informational only: they never trigger the flag on
    // their own and their absence never suppresses it.
    let mut notes = Vec::new();
    if analysis.any_cue {
        notes.push("translation_cue_words");
    }
    if likely_translation {
        notes.push("non_en_then_en_pages");
    }

    Classification {
        overall,
        en_pages,
        ru_pages,
        ua_pages,
        unknown_pages,
        likely_translation,
        notes: notes.join(","),
    }
}

fn count_label(analysis: &PageAnalysis, lang: PageLanguage) -> usize {
    analysis
        .labels
        .iter()
        .filter(|l| **l == Some(lang))
        .count()
}
