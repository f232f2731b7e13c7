use std::path::PathBuf;

use sightcheck::application::services::{
    AssemblyError, AttachmentBudgets, AttachmentError, AttachmentProcessor, PromptAssembler,
};
use sightcheck::domain::{ContentBlock, MessageRole, PlatformCapabilities};

use crate::helpers::write_file;

fn assembler(capabilities: PlatformCapabilities) -> PromptAssembler {
    let processor =
        AttachmentProcessor::new(AttachmentBudgets::default(), capabilities.supports_vision, None);
    PromptAssembler::new(capabilities, processor)
}

#[test]
fn given_images_and_attachments_then_blocks_keep_composition_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let screenshot = write_file(&dir, "screen.png", b"fake png");
    let reference = write_file(&dir, "reference.png", b"fake png too");
    let notes = write_file(&dir, "notes.txt", b"expected layout");
    let capabilities = PlatformCapabilities::ollama();

    let prompt = assembler(capabilities)
        .build(
            "system instruction",
            "the logo is visible",
            &[screenshot.clone(), reference.clone()],
            &[notes],
        )
        .expect("build");

    let message = prompt.message();
    assert_eq!(message.role, MessageRole::User);
    assert_eq!(message.content.len(), 5);
    assert_eq!(
        message.content[0],
        ContentBlock::Text {
            text: "system instruction".to_string()
        }
    );
    assert_eq!(
        message.content[1],
        ContentBlock::Text {
            text: "the logo is visible".to_string()
        }
    );
    assert_eq!(
        message.content[2],
        ContentBlock::Image {
            reference: screenshot
        }
    );
    assert_eq!(
        message.content[3],
        ContentBlock::Image {
            reference
        }
    );
    match &message.content[4] {
        ContentBlock::Text { text } => assert!(text.starts_with("ATTACHMENT: notes.txt ")),
        ContentBlock::Image { .. } => panic!("expected the attachment text block"),
    }
}

#[test]
fn given_no_vision_support_then_existing_images_are_validated_but_omitted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let screenshot = write_file(&dir, "screen.png", b"fake png");
    let capabilities = PlatformCapabilities::ollama().with_vision(false);

    let prompt = assembler(capabilities)
        .build("system", "instruction", &[screenshot], &[])
        .expect("build");

    assert_eq!(prompt.message().content.len(), 2);
    assert!(
        prompt
            .message()
            .content
            .iter()
            .all(|block| matches!(block, ContentBlock::Text { .. }))
    );
}

#[test]
fn given_missing_image_without_vision_then_build_still_fails_with_not_found() {
    let capabilities = PlatformCapabilities::ollama().with_vision(false);
    let missing = PathBuf::from("/nonexistent/screen.png");

    let result = assembler(capabilities).build("system", "instruction", &[missing.clone()], &[]);

    match result {
        Err(AssemblyError::ImageNotFound(path)) => assert_eq!(path, missing),
        other => panic!("expected ImageNotFound, got {other:?}"),
    }
}

#[test]
fn given_missing_image_with_vision_then_build_fails_with_not_found() {
    let capabilities = PlatformCapabilities::ollama();

    let result = assembler(capabilities).build(
        "system",
        "instruction",
        &[PathBuf::from("/nonexistent/screen.png")],
        &[],
    );

    assert!(matches!(result, Err(AssemblyError::ImageNotFound(_))));
}

#[test]
fn given_missing_attachment_then_build_fails_with_attachment_not_found() {
    let capabilities = PlatformCapabilities::ollama();

    let result = assembler(capabilities).build(
        "system",
        "instruction",
        &[],
        &[PathBuf::from("/nonexistent/notes.txt")],
    );

    assert!(matches!(
        result,
        Err(AssemblyError::Attachment(AttachmentError::NotFound(_)))
    ));
}

#[test]
fn given_multiple_attachments_then_their_blocks_keep_input_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = write_file(&dir, "first.txt", b"one");
    let second = write_file(&dir, "second.txt", b"two");
    let capabilities = PlatformCapabilities::ollama();

    let prompt = assembler(capabilities)
        .build("system", "instruction", &[], &[first, second])
        .expect("build");

    let texts: Vec<&str> = prompt
        .message()
        .content
        .iter()
        .map(|block| match block {
            ContentBlock::Text { text } => text.as_str(),
            ContentBlock::Image { .. } => panic!("expected only text blocks"),
        })
        .collect();
    assert!(texts[2].starts_with("ATTACHMENT: first.txt "));
    assert!(texts[3].starts_with("ATTACHMENT: second.txt "));
}
