use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use thiserror::Error;

pub mod attachments;

pub use attachments::extract_attachment_references;

#[derive(Error, Debug)]
pub enum DocxError {
    #[error("failed to open docx: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("failed to parse document XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extract the paragraph texts of a `.docx` file, in document order.
///
/// A docx is a zip container; the body lives in `word/document.xml` with
/// paragraphs as `<w:p>` elements and text runs as `<w:t>`. Formatting,
/// tables-of-contents fields, and embedded objects are ignored — only the
/// visible run text survives.
pub fn extract_paragraphs(path: &Path) -> Result<Vec<String>, DocxError> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut xml = String::new();
    archive.by_name("word/document.xml")?.read_to_string(&mut xml)?;
    parse_paragraphs(&xml)
}

/// All non-empty paragraph texts joined with newlines, the unit the
/// pseudo-page chunker slices.
pub fn extract_text(path: &Path) -> Result<String, DocxError> {
    let paragraphs = extract_paragraphs(path)?;
    Ok(paragraphs.join("\n"))
}

fn parse_paragraphs(xml: &str) -> Result<Vec<String>, DocxError> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => current.clear(),
                b"t" => in_text_run = true,
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"p" => {
                    if !current.trim().is_empty() {
                        paragraphs.push(current.trim().to_string());
                    }
                    current.clear();
                }
                b"t" => in_text_run = false,
                _ => {}
            },
            // Run breaks and tabs are self-closing; render them as spaces
            // so adjacent runs don't fuse into one word.
            Event::Empty(e) => match e.local_name().as_ref() {
                b"br" | b"tab" => current.push(' '),
                _ => {}
            },
            Event::Text(t) => {
                if in_text_run {
                    current.push_str(&t.unescape()?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn document_xml(paragraphs: &[&str]) -> String {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>{body}</w:body></w:document>"#
        )
    }

    fn write_docx(xml: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut writer = zip::ZipWriter::new(file.reopen().unwrap());
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap();
        file
    }

    #[test]
    fn test_extracts_paragraphs_in_order() {
        let docx = write_docx(&document_xml(&["First paragraph.", "Second paragraph."]));
        let paragraphs = extract_paragraphs(docx.path()).unwrap();
        assert_eq!(paragraphs, vec!["First paragraph.", "Second paragraph."]);
    }

    #[test]
    fn test_blank_paragraphs_are_skipped() {
        let docx = write_docx(&document_xml(&["Kept.", "   ", "Also kept."]));
        let paragraphs = extract_paragraphs(docx.path()).unwrap();
        assert_eq!(paragraphs, vec!["Kept.", "Also kept."]);
    }

    #[test]
    fn test_multiple_runs_in_one_paragraph() {
        let xml = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body><w:p><w:r><w:t>Split </w:t></w:r><w:r><w:t>across runs</w:t></w:r></w:p></w:body>
</w:document>"#;
        let docx = write_docx(xml);
        let paragraphs = extract_paragraphs(docx.path()).unwrap();
        assert_eq!(paragraphs, vec!["Split across runs"]);
    }

    #[test]
    fn test_xml_entities_are_unescaped() {
        let docx = write_docx(&document_xml(&["Smith &amp; Jones"]));
        let paragraphs = extract_paragraphs(docx.path()).unwrap();
        assert_eq!(paragraphs, vec!["Smith & Jones"]);
    }

    #[test]
    fn test_extract_text_joins_with_newlines() {
        let docx = write_docx(&document_xml(&["One.", "Two."]));
        assert_eq!(extract_text(docx.path()).unwrap(), "One.\nTwo.");
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not a zip archive").unwrap();
        assert!(extract_paragraphs(file.path()).is_err());
    }
}
