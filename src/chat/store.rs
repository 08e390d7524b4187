use super::message::{Message, MessageId, Sender};

/// Append-only, ordered history of the current session.
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
    last_id: u64,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(
        &mut self,
        sender: Sender,
        text: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> &Message {
        self.last_id += 1;
        self.messages.push(Message {
            id: MessageId(self.last_id),
            text: text.into(),
            sender,
            timestamp: timestamp.into(),
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_in_order_with_increasing_ids() {
        let mut store = MessageStore::new();
        assert!(store.is_empty());

        let first = store.append(Sender::User, "Hello", "T1").id;
        let second = store.append(Sender::Assistant, "Hi", "T2").id;

        assert!(second > first);
        assert_eq!(store.len(), 2);
        let texts: Vec<&str> = store.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["Hello", "Hi"]);
        assert_eq!(store.last().map(|m| m.sender), Some(Sender::Assistant));
    }

    #[test]
    fn empty_assistant_text_is_kept() {
        let mut store = MessageStore::new();
        let message = store.append(Sender::Assistant, "", "T");
        assert_eq!(message.text, "");
        assert_eq!(message.id, MessageId(1));
    }
}
