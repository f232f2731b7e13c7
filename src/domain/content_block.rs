use std::path::PathBuf;

/// One unit of a composed prompt message. Block order is significant and is
/// preserved all the way to the wire format.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Text { text: String },
    /// References an image on the local filesystem; encoding into a transport
    /// form happens at render time.
    Image { reference: PathBuf },
}
