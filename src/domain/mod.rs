mod capabilities;
mod content_block;
mod message;
mod message_role;
mod verdict;

pub use capabilities::{ImageDetail, PlatformCapabilities};
pub use content_block::ContentBlock;
pub use message::Message;
pub use message_role::MessageRole;
pub use verdict::{Verdict, VerdictOutcome};
