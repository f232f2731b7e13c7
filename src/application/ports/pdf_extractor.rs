use std::path::{Path, PathBuf};

/// Optional PDF capability, resolved at session construction. Absence is a
/// valid state: the attachment pipeline degrades to its base64 fallback.
pub trait PdfExtractor: Send + Sync {
    /// Extract text page by page, stopping once the accumulated length
    /// reaches `max_chars`. The returned text is hard-cut to `max_chars`
    /// characters when the accumulation overshoots.
    fn extract_text(
        &self,
        path: &Path,
        max_chars: usize,
    ) -> Result<ExtractedPdfText, PdfExtractorError>;

    /// Rasterize up to `max_pages` pages into `output_dir`, one image file
    /// per page, returned in page order.
    fn rasterize_pages(
        &self,
        path: &Path,
        max_pages: usize,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, PdfExtractorError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPdfText {
    pub text: String,
    pub truncated: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum PdfExtractorError {
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
}
