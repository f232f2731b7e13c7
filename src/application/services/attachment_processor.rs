use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose};
use tempfile::TempDir;

use crate::application::ports::PdfExtractor;
use crate::domain::ContentBlock;

/// Truncation budgets, fixed at processor construction and applied uniformly
/// to every attachment the processor prepares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentBudgets {
    pub max_bytes: usize,
    pub max_chars: usize,
    pub pdf_max_pages: usize,
}

impl Default for AttachmentBudgets {
    fn default() -> Self {
        Self {
            max_bytes: 200_000,
            max_chars: 200_000,
            pdf_max_pages: 3,
        }
    }
}

/// Turns one file into prompt content blocks: a provenance header followed by
/// a text body, or a page summary followed by rendered page images.
pub struct AttachmentProcessor {
    budgets: AttachmentBudgets,
    supports_vision: bool,
    pdf_extractor: Option<Arc<dyn PdfExtractor>>,
}

/// Ordered blocks produced from one attachment. When the attachment was a
/// rasterized PDF, the directory holding the page images is owned here so the
/// files outlive the blocks that reference them.
pub struct AttachmentResult {
    blocks: Vec<ContentBlock>,
    page_dir: Option<TempDir>,
}

impl AttachmentResult {
    fn text_only(text: String) -> Self {
        Self {
            blocks: vec![ContentBlock::Text { text }],
            page_dir: None,
        }
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn into_parts(self) -> (Vec<ContentBlock>, Option<TempDir>) {
        (self.blocks, self.page_dir)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("attachment not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read attachment {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttachmentFormat {
    Pdf,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttachmentKind {
    Text,
    PdfText,
    PdfImages,
    Base64,
}

impl AttachmentKind {
    fn as_str(&self) -> &'static str {
        match self {
            AttachmentKind::Text => "text",
            AttachmentKind::PdfText => "pdf text",
            AttachmentKind::PdfImages => "pdf images",
            AttachmentKind::Base64 => "base64",
        }
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AttachmentProcessor {
    pub fn new(
        budgets: AttachmentBudgets,
        supports_vision: bool,
        pdf_extractor: Option<Arc<dyn PdfExtractor>>,
    ) -> Self {
        Self {
            budgets,
            supports_vision,
            pdf_extractor,
        }
    }

    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    pub fn prepare(&self, path: &Path) -> Result<AttachmentResult, AttachmentError> {
        let metadata = std::fs::metadata(path).map_err(|source| io_error(path, source))?;
        let size = metadata.len();
        let filename = display_name(path);
        let extension = lowercase_extension(path);
        let mime = guess_mime(&extension);

        let result = match classify(&extension) {
            AttachmentFormat::Pdf => self.prepare_pdf(path, &filename, mime, size)?,
            AttachmentFormat::Text => self.prepare_text(path, &filename, mime, size)?,
        };

        tracing::debug!(
            size,
            blocks = result.blocks.len(),
            "attachment prepared"
        );

        Ok(result)
    }

    fn prepare_text(
        &self,
        path: &Path,
        filename: &str,
        mime: &str,
        size: u64,
    ) -> Result<AttachmentResult, AttachmentError> {
        let (data, truncated) = read_limited(path, self.budgets.max_bytes)?;
        let body = String::from_utf8_lossy(&data);
        let header = attachment_header(filename, mime, size, AttachmentKind::Text, truncated);
        Ok(AttachmentResult::text_only(format!("{header}{body}")))
    }

    fn prepare_pdf(
        &self,
        path: &Path,
        filename: &str,
        mime: &str,
        size: u64,
    ) -> Result<AttachmentResult, AttachmentError> {
        if let Some(extractor) = &self.pdf_extractor {
            match extractor.extract_text(path, self.budgets.max_chars) {
                Ok(extracted) if !extracted.text.trim().is_empty() => {
                    let header = attachment_header(
                        filename,
                        mime,
                        size,
                        AttachmentKind::PdfText,
                        extracted.truncated,
                    );
                    let body = extracted.text.trim();
                    return Ok(AttachmentResult::text_only(format!("{header}{body}")));
                }
                Ok(_) => {
                    tracing::debug!("pdf yielded no usable text, trying page rendering");
                }
                Err(error) => {
                    tracing::debug!(%error, "pdf text extraction failed, trying page rendering");
                }
            }

            if self.supports_vision {
                if let Some(result) =
                    self.render_pdf_pages(extractor.as_ref(), path, filename, mime, size)
                {
                    return Ok(result);
                }
            }
        }

        let (data, truncated) = read_limited(path, self.budgets.max_bytes)?;
        let body = general_purpose::STANDARD.encode(&data);
        let header = attachment_header(filename, mime, size, AttachmentKind::Base64, truncated);
        Ok(AttachmentResult::text_only(format!("{header}{body}")))
    }

    fn render_pdf_pages(
        &self,
        extractor: &dyn PdfExtractor,
        path: &Path,
        filename: &str,
        mime: &str,
        size: u64,
    ) -> Option<AttachmentResult> {
        let page_dir = match tempfile::Builder::new().prefix("sightcheck_pdf_").tempdir() {
            Ok(dir) => dir,
            Err(error) => {
                tracing::debug!(%error, "could not create page directory");
                return None;
            }
        };

        match extractor.rasterize_pages(path, self.budgets.pdf_max_pages, page_dir.path()) {
            Ok(pages) if !pages.is_empty() => {
                let header =
                    attachment_header(filename, mime, size, AttachmentKind::PdfImages, false);
                let mut blocks = Vec::with_capacity(pages.len() + 1);
                blocks.push(ContentBlock::Text {
                    text: format!("{header}[PDF rendered to {} images]", pages.len()),
                });
                blocks.extend(
                    pages
                        .into_iter()
                        .map(|reference| ContentBlock::Image { reference }),
                );
                Some(AttachmentResult {
                    blocks,
                    page_dir: Some(page_dir),
                })
            }
            Ok(_) => None,
            Err(error) => {
                tracing::debug!(%error, "pdf rasterization failed, falling back to base64");
                None
            }
        }
    }
}

/// Header line prefixed to every attachment body. The format is consumed by
/// the model prompt and must stay byte-stable; `size` is always the original
/// file size, never the truncated one.
fn attachment_header(
    filename: &str,
    mime: &str,
    size: u64,
    kind: AttachmentKind,
    truncated: bool,
) -> String {
    let mut header = format!("ATTACHMENT: {filename} (mime: {mime}, size: {size} bytes, format: {kind}");
    if truncated {
        header.push_str(", truncated");
    }
    header.push_str(")\n");
    header
}

fn classify(extension: &str) -> AttachmentFormat {
    match extension {
        "pdf" => AttachmentFormat::Pdf,
        _ => AttachmentFormat::Text,
    }
}

fn guess_mime(extension: &str) -> &'static str {
    match extension {
        "txt" | "log" => "text/plain",
        "pdf" => "application/pdf",
        "md" => "text/markdown",
        "json" => "application/json",
        "yaml" | "yml" => "application/x-yaml",
        "xml" => "application/xml",
        "csv" => "text/csv",
        "py" => "text/x-python",
        "js" => "text/javascript",
        "ts" => "text/typescript",
        "java" => "text/x-java-source",
        "c" | "h" | "cpp" | "hpp" => "text/x-c",
        "rs" => "text/x-rust",
        "go" => "text/x-go",
        "rb" => "text/x-ruby",
        "php" => "text/x-php",
        "sh" => "text/x-shellscript",
        _ => "text/plain",
    }
}

fn read_limited(path: &Path, max_bytes: usize) -> Result<(Vec<u8>, bool), AttachmentError> {
    let file = File::open(path).map_err(|source| io_error(path, source))?;
    let mut data = Vec::new();
    file.take(max_bytes as u64 + 1)
        .read_to_end(&mut data)
        .map_err(|source| io_error(path, source))?;

    let truncated = data.len() > max_bytes;
    if truncated {
        data.truncate(max_bytes);
    }
    Ok((data, truncated))
}

fn io_error(path: &Path, source: std::io::Error) -> AttachmentError {
    if source.kind() == std::io::ErrorKind::NotFound {
        AttachmentError::NotFound(path.to_path_buf())
    } else {
        AttachmentError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}
