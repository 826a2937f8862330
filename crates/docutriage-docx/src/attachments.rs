use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Locates an optional "See " followed by "Attachment <number> - ". Group 1
/// anchors the citation start, group 2 captures the number.
static CITATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:See\s+)?(Attachment\s+(\d+)\s*-\s*)").unwrap());

/// Strips the "Attachment <number> - " prefix off the captured span.
static PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Attachment\s+\d+\s*-\s*").unwrap());

/// An attachment citation pulled out of an affidavit paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentReference {
    pub number: u32,
    /// Cleaned description: prefix removed, cut at the first `)`, with a
    /// guaranteed trailing period.
    pub description: String,
}

/// Scan paragraph texts for `(See) Attachment <N> - <description>` citations.
///
/// The first occurrence of each attachment number wins; later duplicates are
/// dropped. Each citation's text runs from its own anchor to the next
/// citation in the same paragraph (or the paragraph end). Results come back
/// sorted by attachment number.
pub fn extract_attachment_references(paragraphs: &[String]) -> Vec<AttachmentReference> {
    let mut found: Vec<AttachmentReference> = Vec::new();
    let mut seen: HashSet<u32> = HashSet::new();

    for text in paragraphs {
        let captures: Vec<_> = CITATION_RE.captures_iter(text).collect();
        for (i, cap) in captures.iter().enumerate() {
            let Some(number) = cap.get(2).and_then(|m| m.as_str().parse::<u32>().ok()) else {
                continue;
            };
            if !seen.insert(number) {
                continue;
            }

            let start = cap.get(1).map(|m| m.start()).unwrap_or(0);
            let end = captures
                .get(i + 1)
                .and_then(|next| next.get(1))
                .map(|m| m.start())
                .unwrap_or(text.len());

            let raw = text[start..end].trim();
            let mut cleaned = PREFIX_RE.replace(raw, "").trim().to_string();

            // Anything after the closing parenthesis belongs to the
            // surrounding sentence, not the citation.
            if let Some(paren) = cleaned.find(')') {
                cleaned.truncate(paren);
                cleaned = cleaned.trim().to_string();
            }

            if cleaned.is_empty() {
                seen.remove(&number);
                continue;
            }
            if !cleaned.ends_with('.') {
                cleaned.push('.');
            }

            found.push(AttachmentReference {
                number,
                description: cleaned,
            });
        }
    }

    found.sort_by_key(|r| r.number);
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraphs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_basic_citation() {
        let refs = extract_attachment_references(&paragraphs(&[
            "As evidence of this award (See Attachment 3 - Certificate of National Award).",
        ]));
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].number, 3);
        assert_eq!(refs[0].description, "Certificate of National Award.");
    }

    #[test]
    fn test_sorted_by_number_across_paragraphs() {
        let refs = extract_attachment_references(&paragraphs(&[
            "(See Attachment 7 - Salary statement)",
            "(See Attachment 2 - Membership letter)",
        ]));
        let numbers: Vec<u32> = refs.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![2, 7]);
    }

    #[test]
    fn test_first_occurrence_wins_on_duplicates() {
        let refs = extract_attachment_references(&paragraphs(&[
            "(See Attachment 1 - Original description)",
            "(See Attachment 1 - Repeated later)",
        ]));
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].description, "Original description.");
    }

    #[test]
    fn test_multiple_citations_in_one_paragraph() {
        let refs = extract_attachment_references(&paragraphs(&[
            "See Attachment 1 - First exhibit) and See Attachment 2 - Second exhibit).",
        ]));
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].description, "First exhibit.");
        assert_eq!(refs[1].description, "Second exhibit.");
    }

    #[test]
    fn test_trailing_period_preserved_not_doubled() {
        let refs = extract_attachment_references(&paragraphs(&[
            "(See Attachment 4 - Published article about the beneficiary.)",
        ]));
        assert_eq!(refs[0].description, "Published article about the beneficiary.");
    }

    #[test]
    fn test_case_insensitive_prefix() {
        let refs = extract_attachment_references(&paragraphs(&[
            "(see ATTACHMENT 5 - Judging invitation)",
        ]));
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].number, 5);
    }

    #[test]
    fn test_no_citations_yields_empty() {
        let refs = extract_attachment_references(&paragraphs(&[
            "This paragraph cites no attachments at all.",
        ]));
        assert!(refs.is_empty());
    }
}
