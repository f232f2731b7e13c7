use std::path::{Path, PathBuf};

use pdf_oxide::PdfDocument;

use crate::application::ports::{ExtractedPdfText, PdfExtractor, PdfExtractorError};

use super::pdf_rasterizer::rasterize_pages;

/// Default PDF capability: text extraction through pdf_oxide, page rendering
/// through the system pdfium library. Either half failing is survivable; the
/// attachment pipeline degrades to its next fallback.
#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl PdfExtractor for PdfAdapter {
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    fn extract_text(
        &self,
        path: &Path,
        max_chars: usize,
    ) -> Result<ExtractedPdfText, PdfExtractorError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| PdfExtractorError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let page_count = doc.page_count().map_err(|e| {
            PdfExtractorError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;

        let mut chunks: Vec<String> = Vec::new();
        let mut total_chars = 0usize;

        for page_index in 0..page_count {
            let text = doc.extract_text(page_index).unwrap_or_default();
            if text.is_empty() {
                continue;
            }

            total_chars += text.chars().count();
            chunks.push(text);

            if total_chars >= max_chars {
                break;
            }
        }

        tracing::debug!(page_count, total_chars, "PDF text extraction complete");

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
        path: &Path,
        max_pages: usize,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, PdfExtractorError> {
        let data = std::fs::read(path)
            .map_err(|e| PdfExtractorError::ExtractionFailed(format!("failed to read PDF: {e}")))?;

        rasterize_pages(&data, max_pages, output_dir)
    }
}
