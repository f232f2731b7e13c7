use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose};

use crate::application::ports::{ChatMessage, ContentPart, ImageUrl};
use crate::domain::{ContentBlock, ImageDetail, Message};

/// Renders assembled messages into the OpenAI-compatible wire format.
pub struct MessageFormatter {
    image_detail: ImageDetail,
}

#[derive(Debug, thiserror::Error)]
pub enum FormatterError {
    #[error("failed to read image {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MessageFormatter {
    pub fn new(image_detail: ImageDetail) -> Self {
        Self { image_detail }
    }

    pub fn render(&self, messages: &[Message]) -> Result<Vec<ChatMessage>, FormatterError> {
        messages
            .iter()
            .map(|message| self.render_message(message))
            .collect()
    }

    fn render_message(&self, message: &Message) -> Result<ChatMessage, FormatterError> {
        let mut content = Vec::with_capacity(message.content.len());

        for block in &message.content {
            match block {
                ContentBlock::Text { text } => {
                    content.push(ContentPart::Text { text: text.clone() });
                }
                ContentBlock::Image { reference } => {
                    content.push(ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: encode_image_data_uri(reference)?,
                            detail: self.image_detail,
                        },
                    });
                }
            }
        }

        Ok(ChatMessage {
            role: message.role.as_str().to_string(),
            content,
        })
    }
}

/// Paths were validated at assembly time, so a read failure here is a hard
/// error rather than a silently dropped block.
fn encode_image_data_uri(path: &Path) -> Result<String, FormatterError> {
    let bytes = std::fs::read(path).map_err(|source| FormatterError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mime = image_mime(path);
    let encoded = general_purpose::STANDARD.encode(&bytes);
    Ok(format!("data:{mime};base64,{encoded}"))
}

fn image_mime(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "image/png",
    }
}
