use super::message::ChatMessage;

/// Number of most recent messages exposed to rendering.
pub const VISIBLE_WINDOW: usize = 50;

/// Ordered conversation log.
///
/// History replay replaces the whole log; new messages are appended in
/// delivery order without de-duplication. The full log is retained, only
/// [`MessageLog::visible`] is capped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageLog {
    messages: Vec<ChatMessage>,
}

impl MessageLog {
    pub fn replace(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
    }

    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Returns the last `min(VISIBLE_WINDOW, len)` messages.
    pub fn visible(&self) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(VISIBLE_WINDOW);
        &self.messages[start..]
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn all(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
