use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{ChatClient, ChatClientError, ChatRequest, PdfExtractor};
use crate::domain::{PlatformCapabilities, Verdict};

use super::attachment_processor::{AttachmentBudgets, AttachmentProcessor};
use super::message_formatter::{FormatterError, MessageFormatter};
use super::prompt_assembler::{AssemblyError, PromptAssembler};
use super::response_parser::parse_verdict;

/// Default system instruction. It dictates the RESULT/EXPLANATION reply
/// protocol that `parse_verdict` depends on.
pub const VISUAL_ASSERTION_SYSTEM_PROMPT: &str = "\
You are a response system for automated UI testing, specialized in test automation.
Your task is to evaluate an input instruction (assertion) against one or more provided images.
You must verify whether the assertion holds true based on the visual content of the images.
Make sure you observe images in every detail - all the logos, texts, titles, buttons, elements, inputs.

Your response must be strictly formatted like this:

RESULT: // PASS if assertion is verified, FAIL if not
EXPLANATION:
<brief explanation if TRUE, detailed explanation if FALSE>


When the assertion is TRUE:
Confirm the assertion and provide a brief explanation of why it was verified successfully.

When the assertion is FALSE:
Explain in detail what was wrong and why the assertion could not be verified.

Highlight any visual discrepancies, missing elements, or mismatches.

Example Inputs and Outputs:

Input Instruction: \"The login button is visible and labeled 'Sign In'\"
Provided Image: [screenshot of a login form]

Response when TRUE:

RESULT: pass
EXPLANATION:
1. The login button is clearly visible
2. The login button is labeled 'Sign In' as expected.


Response when FALSE:

RESULT: fail
EXPLANATION:
1. The login button is either not visible or not labeled 'Sign In'.
2. The visible button is labeled 'Log In' instead.


Ensure no other text is provided in the response.";

/// One configured verification session. Immutable after construction, so a
/// single instance can serve many `verify` calls, concurrently if the
/// underlying chat client allows it.
pub struct VerificationService {
    capabilities: PlatformCapabilities,
    assembler: PromptAssembler,
    formatter: MessageFormatter,
    chat_client: Arc<dyn ChatClient>,
    system_prompt: String,
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
    #[error(transparent)]
    Format(#[from] FormatterError),
    #[error("chat completion failed: {0}")]
    Transport(#[from] ChatClientError),
}

impl VerificationService {
    pub fn new(
        capabilities: PlatformCapabilities,
        chat_client: Arc<dyn ChatClient>,
        pdf_extractor: Option<Arc<dyn PdfExtractor>>,
    ) -> Self {
        Self::with_budgets(
            capabilities,
            chat_client,
            pdf_extractor,
            AttachmentBudgets::default(),
        )
    }

    pub fn with_budgets(
        capabilities: PlatformCapabilities,
        chat_client: Arc<dyn ChatClient>,
        pdf_extractor: Option<Arc<dyn PdfExtractor>>,
        budgets: AttachmentBudgets,
    ) -> Self {
        let processor =
            AttachmentProcessor::new(budgets, capabilities.supports_vision, pdf_extractor);
        let assembler = PromptAssembler::new(capabilities.clone(), processor);
        let formatter = MessageFormatter::new(capabilities.image_detail);

        Self {
            capabilities,
            assembler,
            formatter,
            chat_client,
            system_prompt: VISUAL_ASSERTION_SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// Evaluates `instruction` against the given screenshots and attachments.
    /// Blocking: assembly, rendering, and the completion call all run on the
    /// calling thread.
    #[tracing::instrument(
        skip(self, instruction),
        fields(
            model = %self.capabilities.model,
            images = image_paths.len(),
            attachments = attachment_paths.len(),
        )
    )]
    pub fn verify(
        &self,
        instruction: &str,
        image_paths: &[PathBuf],
        attachment_paths: &[PathBuf],
    ) -> Result<Verdict, VerificationError> {
        let prompt =
            self.assembler
                .build(&self.system_prompt, instruction, image_paths, attachment_paths)?;

        let messages = self.formatter.render(std::slice::from_ref(prompt.message()))?;
        // Rendered page files are embedded in the request body now.
        drop(prompt);

        let request = ChatRequest {
            model: self.capabilities.model.clone(),
            messages,
        };

        let reply = self.chat_client.complete(&request)?;
        tracing::debug!(reply = %reply, "chat completion reply");

        let verdict = parse_verdict(&reply);
        tracing::info!(outcome = ?verdict.outcome, "visual assertion evaluated");

        Ok(verdict)
    }
}
