use std::sync::Mutex;

use crate::application::ports::{ChatClient, ChatClientError, ChatRequest};

/// Scripted stand-in for a completion endpoint; records the last request so
/// tests can assert on the rendered wire format.
pub struct MockChatClient {
    reply: Result<String, ChatClientError>,
    last_request: Mutex<Option<ChatRequest>>,
}

impl MockChatClient {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing(error: ChatClientError) -> Self {
        Self {
            reply: Err(error),
            last_request: Mutex::new(None),
        }
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request
            .lock()
            .expect("mock lock poisoned")
            .clone()
    }
}

impl ChatClient for MockChatClient {
    fn complete(&self, request: &ChatRequest) -> Result<String, ChatClientError> {
        *self.last_request.lock().expect("mock lock poisoned") = Some(request.clone());

        self.reply.clone()
    }
}
