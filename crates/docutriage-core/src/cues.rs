use once_cell::sync::Lazy;
use regex::Regex;

/// Phrasing that explicitly announces a translation. Matched per page,
/// case-insensitively; a single hit anywhere in the document sets the
/// document-level cue flag.
static TRANSLATION_CUES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\btranslation\b",
        r"(?i)\benglish translation\b",
        r"(?i)\bcertified translation\b",
        r"(?i)\btranslator\b",
        r"(?i)\bcertificate of translation\b",
        r"(?i)\bi certify\b.*\btranslation\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// True if any translation-indicator pattern matches anywhere in `text`.
pub fn has_translation_cue(text: &str) -> bool {
    TRANSLATION_CUES.iter().any(|re| re.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certified_translation_matches() {
        assert!(has_translation_cue(
            "This is a certified translation of the original document."
        ));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(has_translation_cue("CERTIFICATE OF TRANSLATION"));
    }

    #[test]
    fn test_i_certify_spanning_clause() {
        assert!(has_translation_cue(
            "I certify that the foregoing is a true and accurate translation."
        ));
    }

    #[test]
    fn test_translator_signature_line() {
        assert!(has_translation_cue("Signed, Maria Ivanenko, Translator"));
    }

    #[test]
    fn test_no_cue_in_ordinary_text() {
        assert!(!has_translation_cue(
            "The applicant submitted three supporting exhibits."
        ));
    }

    #[test]
    fn test_word_boundary_respected() {
        assert!(!has_translation_cue("mistranslationese"));
    }
}
