use std::path::PathBuf;

use tempfile::TempDir;

use crate::domain::{ContentBlock, Message, PlatformCapabilities};

use super::attachment_processor::{AttachmentError, AttachmentProcessor};

/// Composes the single user message sent per verification: system instruction,
/// user instruction, gated image references, then attachment blocks.
pub struct PromptAssembler {
    capabilities: PlatformCapabilities,
    processor: AttachmentProcessor,
}

/// The assembled message plus the temp directories backing any rasterized PDF
/// pages it references. Page files are deleted when this is dropped, so it
/// must stay alive until the message has been rendered.
#[derive(Debug)]
pub struct AssembledPrompt {
    message: Message,
    _page_dirs: Vec<TempDir>,
}

impl AssembledPrompt {
    pub fn message(&self) -> &Message {
        &self.message
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error("image not found: {}", .0.display())]
    ImageNotFound(PathBuf),
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
}

impl PromptAssembler {
    pub fn new(capabilities: PlatformCapabilities, processor: AttachmentProcessor) -> Self {
        Self {
            capabilities,
            processor,
        }
    }

    #[tracing::instrument(
        skip(self, system_prompt, instruction),
        fields(images = image_paths.len(), attachments = attachment_paths.len())
    )]
    pub fn build(
        &self,
        system_prompt: &str,
        instruction: &str,
        image_paths: &[PathBuf],
        attachment_paths: &[PathBuf],
    ) -> Result<AssembledPrompt, AssemblyError> {
        // Existence is validated for every provided image path, independent of
        // whether vision gating later drops the blocks.
        for path in image_paths {
            if !path.is_file() {
                return Err(AssemblyError::ImageNotFound(path.clone()));
            }
        }

        let mut blocks = vec![
            ContentBlock::Text {
                text: system_prompt.to_string(),
            },
            ContentBlock::Text {
                text: instruction.to_string(),
            },
        ];

        if self.capabilities.supports_vision {
            blocks.extend(image_paths.iter().map(|path| ContentBlock::Image {
                reference: path.clone(),
            }));
        } else if !image_paths.is_empty() {
            tracing::debug!(
                dropped = image_paths.len(),
                "platform does not support vision, omitting image blocks"
            );
        }

        let mut page_dirs = Vec::new();
        for path in attachment_paths {
            let (attachment_blocks, page_dir) = self.processor.prepare(path)?.into_parts();
            blocks.extend(attachment_blocks);
            if let Some(dir) = page_dir {
                page_dirs.push(dir);
            }
        }

        Ok(AssembledPrompt {
            message: Message::user(blocks),
            _page_dirs: page_dirs,
        })
    }
}
