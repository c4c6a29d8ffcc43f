use chrono::Local;

use super::{ChatMessage, Sender};

impl ChatMessage {
    /// Error entry; the text is always prefixed with `Error: `.
    pub fn new_system_error(description: impl std::fmt::Display) -> Self {
        Self::at(Sender::System, format!("Error: {}", description), Local::now())
    }
}
