use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// A single entry in the conversation. Never mutated after construction;
/// the conversation is append-only.
#[derive(Debug, Clone)]
pub struct Message {
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Message {
            content: content.into(),
            sender: Sender::User,
            timestamp: Local::now(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Message {
            content: content.into(),
            sender: Sender::Bot,
            timestamp: Local::now(),
        }
    }

    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_sender() {
        assert_eq!(Message::user("hi").sender, Sender::User);
        assert!(Message::bot("hello").is_bot());
    }
}
