mod chat_client;
mod pdf_extractor;

pub use chat_client::{ChatClient, ChatClientError, ChatMessage, ChatRequest, ContentPart, ImageUrl};
pub use pdf_extractor::{ExtractedPdfText, PdfExtractor, PdfExtractorError};
