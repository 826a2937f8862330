use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ScanOptions;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub scan: Option<ScanConfig>,
    pub ocr: Option<OcrConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    pub sample_pages: Option<usize>,
    pub text_threshold: Option<usize>,
    pub min_detect_chars: Option<usize>,
    pub docx_window_chars: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrConfig {
    pub dpi: Option<u32>,
    pub first_pages: Option<usize>,
    pub last_pages: Option<usize>,
    /// Tesseract language pack spec, e.g. "eng+rus+ukr".
    pub language: Option<String>,
    /// Explicit tessdata directory, overriding the system default.
    pub tessdata_dir: Option<String>,
}

/// Platform config directory path: `<config_dir>/docutriage/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("docutriage").join("config.toml"))
}

/// Load config by cascading CWD `.docutriage.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from(".docutriage.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &PathBuf) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        scan: Some(ScanConfig {
            sample_pages: pick(&overlay.scan, &base.scan, |s| s.sample_pages),
            text_threshold: pick(&overlay.scan, &base.scan, |s| s.text_threshold),
            min_detect_chars: pick(&overlay.scan, &base.scan, |s| s.min_detect_chars),
            docx_window_chars: pick(&overlay.scan, &base.scan, |s| s.docx_window_chars),
        }),
        ocr: Some(OcrConfig {
            dpi: pick(&overlay.ocr, &base.ocr, |o| o.dpi),
            first_pages: pick(&overlay.ocr, &base.ocr, |o| o.first_pages),
            last_pages: pick(&overlay.ocr, &base.ocr, |o| o.last_pages),
            language: pick(&overlay.ocr, &base.ocr, |o| o.language.clone()),
            tessdata_dir: pick(&overlay.ocr, &base.ocr, |o| o.tessdata_dir.clone()),
        }),
    }
}

fn pick<S, T>(overlay: &Option<S>, base: &Option<S>, f: impl Fn(&S) -> Option<T>) -> Option<T> {
    overlay
        .as_ref()
        .and_then(&f)
        .or_else(|| base.as_ref().and_then(&f))
}

impl ConfigFile {
    /// Apply file values over the built-in defaults, producing runtime
    /// scan options. CLI flags are applied on top by the caller.
    pub fn scan_options(&self) -> ScanOptions {
        let mut opts = ScanOptions::default();
        if let Some(scan) = &self.scan {
            if let Some(v) = scan.sample_pages {
                opts.sample_pages = v;
            }
            if let Some(v) = scan.text_threshold {
                opts.text_threshold = v;
            }
            if let Some(v) = scan.min_detect_chars {
                opts.min_detect_chars = v;
            }
            if let Some(v) = scan.docx_window_chars {
                opts.docx_window_chars = v;
            }
        }
        if let Some(ocr) = &self.ocr {
            if let Some(v) = ocr.dpi {
                opts.ocr_dpi = v;
            }
            if let Some(v) = ocr.first_pages {
                opts.ocr_first_pages = v;
            }
            if let Some(v) = ocr.last_pages {
                opts.ocr_last_pages = v;
            }
        }
        opts
    }
}
