use std::path::Path;

use sightcheck::application::ports::{PdfExtractor, PdfExtractorError};
use sightcheck::infrastructure::pdf::PdfAdapter;

use crate::helpers::write_file;

#[test]
fn given_corrupt_bytes_when_extracting_text_then_returns_extraction_failed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(&dir, "corrupt.pdf", b"not a pdf at all");
    let adapter = PdfAdapter::new();

    let result = adapter.extract_text(&path, 1000);

    assert!(matches!(
        result,
        Err(PdfExtractorError::ExtractionFailed(_))
    ));
}

#[test]
fn given_missing_file_when_extracting_text_then_returns_extraction_failed() {
    let adapter = PdfAdapter::new();

    let result = adapter.extract_text(Path::new("/nonexistent/ghost.pdf"), 1000);

    assert!(matches!(
        result,
        Err(PdfExtractorError::ExtractionFailed(_))
    ));
}

#[test]
fn given_corrupt_bytes_when_rasterizing_then_returns_extraction_failed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(&dir, "corrupt.pdf", b"not a pdf at all");
    let adapter = PdfAdapter::new();

    let result = adapter.rasterize_pages(&path, 3, dir.path());

    assert!(matches!(
        result,
        Err(PdfExtractorError::ExtractionFailed(_))
    ));
}
