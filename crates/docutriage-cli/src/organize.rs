use std::path::Path;

use once_cell::sync::Lazy;
use owo_colors::OwoColorize;
use regex::Regex;
use walkdir::WalkDir;

/// Pulls the attachment number out of names like "Attachment 12 - diploma.pdf"
/// or "attachment_3.docx".
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)attachment[\s_]*([0-9]+)").unwrap());

/// Copy every file under `source` whose name contains "attachment" into
/// `dest/<number>/`, creating the numbered folder as needed. Files without a
/// parseable number are reported and skipped.
pub fn run(source: &Path, dest: &Path) -> anyhow::Result<()> {
    if !source.is_dir() {
        anyhow::bail!("source folder does not exist: {}", source.display());
    }
    if !dest.is_dir() {
        anyhow::bail!("destination folder does not exist: {}", dest.display());
    }

    let mut copied = 0usize;
    let mut skipped = 0usize;

    for entry in WalkDir::new(source).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.to_lowercase().contains("attachment") {
            continue;
        }

        match NUMBER_RE.captures(&name).and_then(|c| c.get(1)) {
            Some(number) => {
                let target_dir = dest.join(number.as_str());
                std::fs::create_dir_all(&target_dir)?;
                std::fs::copy(entry.path(), target_dir.join(&name))?;
                println!(
                    "{} '{}' -> folder {}",
                    "copied".green(),
                    name,
                    number.as_str()
                );
                copied += 1;
            }
            None => {
                println!("{} no number found in '{}'", "skipped".yellow(), name);
                skipped += 1;
            }
        }
    }

    if copied == 0 && skipped == 0 {
        println!("No matching files found in: {}", source.display());
    } else {
        println!("Done: {copied} copied, {skipped} skipped.");
    }
    Ok(())
}
