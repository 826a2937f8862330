use crate::text::normalize;

/// Whether a sampled page set yields so little embedded text that the PDF
/// should be treated as scanned.
///
/// Text-native PDFs produce hundreds to thousands of characters even on a
/// two-page sample; fully scanned ones produce near zero. The threshold is a
/// cheap short-circuit, not a tuned classifier.
pub fn is_mostly_empty(pages: &[String], threshold: usize) -> bool {
    let total: usize = pages.iter().map(|p| normalize(p).chars().count()).sum();
    total < threshold
}

/// Pick which pages of a scanned PDF to OCR: the first `first_n` plus the
/// last `last_n`, clipped to the real page range, de-duplicated, ascending.
/// Page numbers are 1-based.
///
/// When the page count could not be determined, fall back to `1..=first_n`
/// and let the rasterizer stop wherever the document ends.
pub fn select_ocr_pages(page_count: Option<usize>, first_n: usize, last_n: usize) -> Vec<usize> {
    let Some(n) = page_count.filter(|&n| n > 0) else {
        return (1..=first_n).collect();
    };

    let mut pages: Vec<usize> = (1..=first_n.min(n)).collect();
    if last_n > 0 {
        let start_last = n.saturating_sub(last_n - 1).max(1);
        for p in start_last..=n {
            if !pages.contains(&p) {
                pages.push(p);
            }
        }
    }
    pages
}
