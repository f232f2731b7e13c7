use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::application::ports::{ExtractedPdfText, PdfExtractor, PdfExtractorError};

/// Scripted PDF capability for tests: fixed page texts and a fixed renderable
/// page count, with switches to force either half to fail.
pub struct MockPdfExtractor {
    page_texts: Vec<String>,
    renderable_pages: usize,
    fail_extraction: bool,
    fail_rasterization: bool,
    last_output_dir: Mutex<Option<PathBuf>>,
}

impl MockPdfExtractor {
    pub fn with_page_texts(page_texts: Vec<String>) -> Self {
        Self {
            page_texts,
            renderable_pages: 0,
            fail_extraction: false,
            fail_rasterization: false,
            last_output_dir: Mutex::new(None),
        }
    }

    pub fn with_renderable_pages(renderable_pages: usize) -> Self {
        Self {
            page_texts: Vec::new(),
            renderable_pages,
            fail_extraction: false,
            fail_rasterization: false,
            last_output_dir: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            page_texts: Vec::new(),
            renderable_pages: 0,
            fail_extraction: true,
            fail_rasterization: true,
            last_output_dir: Mutex::new(None),
        }
    }

    /// Directory the most recent rasterization wrote into.
    pub fn last_output_dir(&self) -> Option<PathBuf> {
        self.last_output_dir
            .lock()
            .expect("mock lock poisoned")
            .clone()
    }
}

impl PdfExtractor for MockPdfExtractor {
    fn extract_text(
        &self,
        _path: &Path,
        max_chars: usize,
    ) -> Result<ExtractedPdfText, PdfExtractorError> {
        if self.fail_extraction {
            return Err(PdfExtractorError::ExtractionFailed(
                "scripted extraction failure".to_string(),
            ));
        }

        let mut chunks: Vec<String> = Vec::new();
        let mut total_chars = 0usize;

        for text in &self.page_texts {
            if text.is_empty() {
                continue;
            }
            total_chars += text.chars().count();
            chunks.push(text.clone());
            if total_chars >= max_chars {
                break;
            }
        }

        let joined = chunks.join("\n");
        let truncated = joined.chars().count() > max_chars;
        let text = if truncated {
            joined.chars().take(max_chars).collect()
        } else {
            joined
        };

        Ok(ExtractedPdfText { text, truncated })
    }

    fn rasterize_pages(
        &self,
        _path: &Path,
        max_pages: usize,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, PdfExtractorError> {
        if self.fail_rasterization {
            return Err(PdfExtractorError::ExtractionFailed(
                "scripted rasterization failure".to_string(),
            ));
        }

        *self.last_output_dir.lock().expect("mock lock poisoned") =
            Some(output_dir.to_path_buf());

        let pages_to_render = self.renderable_pages.min(max_pages);
        let mut page_paths = Vec::with_capacity(pages_to_render);

        for index in 0..pages_to_render {
            let page_path = output_dir.join(format!("pdf_page_{}.png", index + 1));
            std::fs::write(&page_path, b"not a real png").map_err(|e| {
                PdfExtractorError::ExtractionFailed(format!("write page {index} failed: {e}"))
            })?;
            page_paths.push(page_path);
        }

        Ok(page_paths)
    }
}
