//! Visual assertion testing against vision-capable language models.
//!
//! Screenshots and supporting attachments are assembled into a single
//! chat-completion prompt, sent to an OpenAI-compatible endpoint, and the
//! model's reply is parsed into a pass/fail [`domain::Verdict`].

pub mod application;
pub mod domain;
pub mod infrastructure;
