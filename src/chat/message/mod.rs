// src/chat/message/mod.rs

mod new_user;
mod new_assistant;
mod new_system;

use chrono::{DateTime, Local};

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    User,
    Assistant,
    /// Failures surfaced to the user.
    System,
}

impl Sender {
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Assistant => "Assistant",
            Sender::System => "System",
        }
    }
}

/// A single transcript entry. Fields are private so an entry cannot change
/// after it is created.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    sender: Sender,
    timestamp: DateTime<Local>,
    text: String,
}

impl ChatMessage {
    pub(crate) fn at(sender: Sender, text: String, timestamp: DateTime<Local>) -> Self {
        Self { sender, timestamp, text }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// `[HH:MM] You: text`
    pub fn header_line(&self) -> String {
        format!(
            "[{}] {}: {}",
            self.timestamp.format("%H:%M"),
            self.sender.label(),
            self.text
        )
    }
}
