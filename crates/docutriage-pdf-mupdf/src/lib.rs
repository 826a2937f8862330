use std::path::{Path, PathBuf};

use mupdf::{Colorspace, Document, ImageFormat, Matrix, TextPageFlags};

use docutriage_core::{BackendError, PdfBackend};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island — it isolates the mupdf dependency
/// (which is AGPL-3.0) so that non-PDF code paths do not transitively
/// depend on it.
#[derive(Debug, Default)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }

    fn open(&self, path: &Path) -> Result<Document, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;
        Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))
    }
}

impl PdfBackend for MupdfBackend {
    fn page_count(&self, path: &Path) -> Result<usize, BackendError> {
        let document = self.open(path)?;
        let count = document
            .page_count()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
        Ok(count.max(0) as usize)
    }

    fn extract_page_texts(
        &self,
        path: &Path,
        max_pages: Option<usize>,
    ) -> Result<Vec<String>, BackendError> {
        let document = self.open(path)?;

        let mut pages_text = Vec::new();
        for page_result in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
        {
            if let Some(limit) = max_pages {
                if pages_text.len() >= limit {
                    break;
                }
            }

            // A page that fails to yield text is evidence of a scanned
            // document, not a fatal condition: record it as empty.
            let Ok(page) = page_result else {
                pages_text.push(String::new());
                continue;
            };
            let Ok(text_page) = page.to_text_page(TextPageFlags::empty()) else {
                pages_text.push(String::new());
                continue;
            };

            let mut page_text = String::new();
            for block in text_page.blocks() {
                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    page_text.push_str(&line_text);
                    page_text.push('\n');
                }
            }
            pages_text.push(page_text);
        }

        Ok(pages_text)
    }

    fn rasterize_range(
        &self,
        path: &Path,
        first: usize,
        last: usize,
        dpi: u32,
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>, BackendError> {
        let document = self.open(path)?;
        let count = document
            .page_count()
            .map_err(|e| BackendError::RasterError(e.to_string()))?
            .max(0) as usize;

        // PDF points are 72 per inch; the scale matrix converts to DPI.
        let zoom = dpi as f32 / 72.0;
        let matrix = Matrix::new_scale(zoom, zoom);
        let colorspace = Colorspace::device_rgb();

        let mut images = Vec::new();
        for page_no in first..=last {
            if page_no > count || page_no == 0 {
                break;
            }
            let page = document
                .load_page((page_no - 1) as i32)
                .map_err(|e| BackendError::RasterError(e.to_string()))?;
            let pixmap = page
                .to_pixmap(&matrix, &colorspace, false, false)
                .map_err(|e| BackendError::RasterError(e.to_string()))?;

            let out_path = out_dir.join(format!("page-{page_no:04}.png"));
            let out_str = out_path
                .to_str()
                .ok_or_else(|| BackendError::RasterError("invalid path encoding".into()))?;
            pixmap
                .save_as(out_str, ImageFormat::PNG)
                .map_err(|e| BackendError::RasterError(e.to_string()))?;
            images.push(out_path);
        }

        Ok(images)
    }
}
