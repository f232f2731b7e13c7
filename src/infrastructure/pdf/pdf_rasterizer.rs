use std::path::{Path, PathBuf};

use image::ImageFormat;
use pdfium_render::prelude::*;

use crate::application::ports::PdfExtractorError;

const RENDER_DPI: f32 = 150.0;

pub(super) fn rasterize_pages(
    data: &[u8],
    max_pages: usize,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, PdfExtractorError> {
    let pdfium = Pdfium::new(
        Pdfium::bind_to_system_library()
            .map_err(|e| PdfExtractorError::ExtractionFailed(format!("pdfium bind failed: {e}")))?,
    );

    let doc = pdfium
        .load_pdf_from_byte_slice(data, None)
        .map_err(|e| PdfExtractorError::ExtractionFailed(format!("pdfium open failed: {e}")))?;

    let page_count = doc.pages().len() as usize;
    let pages_to_render = page_count.min(max_pages);

    let mut page_paths: Vec<PathBuf> = Vec::with_capacity(pages_to_render);

    for index in 0..pages_to_render {
        let page = doc.pages().get(index as u16).map_err(|e| {
            PdfExtractorError::ExtractionFailed(format!("page {index} access failed: {e}"))
        })?;

        let width = (page.width().value * RENDER_DPI / 72.0) as i32;
        let height = (page.height().value * RENDER_DPI / 72.0) as i32;

        let bitmap = page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(width)
                    .set_target_height(height),
            )
            .map_err(|e| {
                PdfExtractorError::ExtractionFailed(format!("render page {index} failed: {e}"))
            })?;

        let dynamic_image = bitmap.as_image();
        let mut png_bytes: Vec<u8> = Vec::new();
        dynamic_image
            .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
            .map_err(|e| {
                PdfExtractorError::ExtractionFailed(format!("PNG encode page {index} failed: {e}"))
            })?;

        let page_path = output_dir.join(format!("pdf_page_{}.png", index + 1));
        std::fs::write(&page_path, &png_bytes).map_err(|e| {
            PdfExtractorError::ExtractionFailed(format!("write page {index} failed: {e}"))
        })?;

        page_paths.push(page_path);
    }

    Ok(page_paths)
}
