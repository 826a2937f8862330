use std::path::PathBuf;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use docutriage_core::{DocumentKind, RecordOutcome, ScanOptions, config_file};
use docutriage_ingest::batch;
use docutriage_reporting::ExportFormat;

mod organize;

/// Language triage for legal-filing batches — classify PDFs and Word
/// documents by language and flag probable translations.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan a directory tree and write one report row per document
    Scan {
        /// Directory containing .pdf / .docx files (other extensions are ignored)
        input_dir: PathBuf,

        /// Report path; format inferred from the extension (.csv or .json)
        #[arg(short, long, default_value = "lang_report.csv")]
        output: PathBuf,

        /// Rasterization DPI for scanned pages
        #[arg(long)]
        dpi: Option<u32>,

        /// Head pages to OCR per scanned PDF
        #[arg(long)]
        first_pages: Option<usize>,

        /// Tail pages to OCR per scanned PDF
        #[arg(long)]
        last_pages: Option<usize>,

        /// Tesseract language pack spec (default "eng+rus+ukr")
        #[arg(long)]
        ocr_lang: Option<String>,

        /// Explicit tessdata directory
        #[arg(long)]
        tessdata_dir: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Disable the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Extract "(See) Attachment N - ..." citations from an affidavit
    Attachments {
        /// Path to the .docx affidavit
        file_path: PathBuf,
    },

    /// Copy attachment files into per-number destination folders
    Organize {
        /// Folder containing the attachment files
        source: PathBuf,

        /// Destination folder; one numbered subfolder is created per attachment
        dest: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Scan {
            input_dir,
            output,
            dpi,
            first_pages,
            last_pages,
            ocr_lang,
            tessdata_dir,
            no_color,
            no_progress,
        } => scan(
            input_dir,
            output,
            dpi,
            first_pages,
            last_pages,
            ocr_lang,
            tessdata_dir,
            no_color,
            no_progress,
        ),
        Command::Attachments { file_path } => attachments(file_path),
        Command::Organize { source, dest } => organize::run(&source, &dest),
    }
}

#[allow(clippy::too_many_arguments)]
fn scan(
    input_dir: PathBuf,
    output: PathBuf,
    dpi: Option<u32>,
    first_pages: Option<usize>,
    last_pages: Option<usize>,
    ocr_lang: Option<String>,
    tessdata_dir: Option<String>,
    no_color: bool,
    no_progress: bool,
) -> anyhow::Result<()> {
    if !input_dir.is_dir() {
        anyhow::bail!("input directory not found: {}", input_dir.display());
    }

    // Resolve configuration: CLI flags > env vars > config file > defaults
    let config = config_file::load_config();
    let mut opts: ScanOptions = config.scan_options();
    if let Some(v) = dpi {
        opts.ocr_dpi = v;
    }
    if let Some(v) = first_pages {
        opts.ocr_first_pages = v;
    }
    if let Some(v) = last_pages {
        opts.ocr_last_pages = v;
    }

    let ocr_lang = ocr_lang
        .or_else(|| std::env::var("DOCUTRIAGE_OCR_LANG").ok())
        .or_else(|| config.ocr.as_ref().and_then(|o| o.language.clone()))
        .unwrap_or_else(|| docutriage_ocr::DEFAULT_LANGUAGES.to_string());
    let tessdata_dir = tessdata_dir
        .or_else(|| std::env::var("DOCUTRIAGE_TESSDATA").ok())
        .or_else(|| config.ocr.as_ref().and_then(|o| o.tessdata_dir.clone()));

    // Long-lived capabilities, built once and passed by reference into the
    // pipeline. The lingua model build is the slow part.
    let pdf = docutriage_pdf_mupdf::MupdfBackend::new();
    let detector = docutriage_lingua::LinguaDetector::new();
    let mut ocr = docutriage_ocr::TesseractTranscriber::new().with_languages(ocr_lang.as_str());
    if let Some(dir) = tessdata_dir {
        ocr = ocr.with_tessdata_dir(dir);
    }

    let candidates = batch::collect_candidates(&input_dir);
    let bar = if no_progress || candidates.is_empty() {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(candidates.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("=> "),
        );
        bar
    };

    let mut records = Vec::with_capacity(candidates.len());
    for path in &candidates {
        bar.set_message(
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );
        records.push(batch::scan_file_record(
            &input_dir, path, &pdf, &ocr, &detector, &opts,
        ));
        bar.inc(1);
    }
    bar.finish_and_clear();

    let format = ExportFormat::from_path(&output);
    docutriage_reporting::export_records(&records, format, &output)?;

    print_summary(&records, &output, !no_color);
    Ok(())
}

fn print_summary(records: &[docutriage_core::DocumentRecord], output: &PathBuf, color: bool) {
    let errors = records
        .iter()
        .filter(|r| r.kind == DocumentKind::Error)
        .count();
    let flagged = records
        .iter()
        .filter(|r| {
            matches!(&r.outcome, RecordOutcome::Classified(c) if c.likely_translation)
        })
        .count();

    println!(
        "Wrote {} rows -> {}",
        records.len(),
        output.display()
    );
    if flagged > 0 {
        let msg = format!("{flagged} document(s) flagged as likely translations");
        if color {
            println!("{}", msg.yellow());
        } else {
            println!("{msg}");
        }
    }
    if errors > 0 {
        let msg = format!("{errors} file(s) could not be processed (see error rows)");
        if color {
            println!("{}", msg.red());
        } else {
            println!("{msg}");
        }
    }
}

fn attachments(file_path: PathBuf) -> anyhow::Result<()> {
    let paragraphs = docutriage_docx::extract_paragraphs(&file_path)?;
    let references = docutriage_docx::extract_attachment_references(&paragraphs);

    if references.is_empty() {
        println!("No attachment references found in the document.");
        return Ok(());
    }

    println!("Cleaned and sorted attachment references:");
    for reference in references {
        println!("{}", reference.description);
    }
    Ok(())
}
