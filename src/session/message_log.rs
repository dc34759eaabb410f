use crate::common::ChatMessage;

/// Ordered, append-only record of the current conversation.
///
/// Insertion order is display order; entries are never reordered or removed.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: Vec<ChatMessage>,
}

impl MessageLog {
    pub fn append(&mut self, message: ChatMessage) {
        self.entries.push(message);
    }

    pub fn as_slice(&self) -> &[ChatMessage] {
        &self.entries
    }

    /// Entries appended at or after `index`.
    pub fn since(&self, index: usize) -> &[ChatMessage] {
        self.entries.get(index..).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
