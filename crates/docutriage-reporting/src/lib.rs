use std::io::Write;
use std::path::Path;

use docutriage_core::{DocumentRecord, RecordOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Infer the format from an output path's extension; CSV is the default.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }
}

/// Export one row per document to the given path.
pub fn export_records(
    records: &[DocumentRecord],
    format: ExportFormat,
    path: &Path,
) -> std::io::Result<()> {
    let content = match format {
        ExportFormat::Csv => export_csv(records),
        ExportFormat::Json => export_json(records),
    };
    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())
}

fn csv_escape(s: &str) -> String {
    if s.contains('"') || s.contains(',') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// One row per document: counts and the translation verdict for classified
/// files, zeroed counts and an `ERROR:` note for failed ones.
pub fn export_csv(records: &[DocumentRecord]) -> String {
    let mut out = String::from(
        "file,kind,overall,en_pages,ru_pages,ua_pages,unknown_pages,likely_translation,notes\n",
    );
    for record in records {
        match &record.outcome {
            RecordOutcome::Classified(c) => {
                let overall = c
                    .overall
                    .map(|l| l.as_str())
                    .unwrap_or("UNKNOWN");
                out.push_str(&format!(
                    "{},{},{},{},{},{},{},{},{}\n",
                    csv_escape(&record.file),
                    record.kind.as_str(),
                    overall,
                    c.en_pages,
                    c.ru_pages,
                    c.ua_pages,
                    c.unknown_pages,
                    if c.likely_translation { "yes" } else { "no" },
                    csv_escape(&c.notes),
                ));
            }
            RecordOutcome::Failed { error } => {
                out.push_str(&format!(
                    "{},{},,0,0,0,0,,{}\n",
                    csv_escape(&record.file),
                    record.kind.as_str(),
                    csv_escape(&format!("ERROR:{error}")),
                ));
            }
        }
    }
    out
}

pub fn export_json(records: &[DocumentRecord]) -> String {
    // DocumentRecord is a plain serde tree; serialization cannot fail.
    serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
}
