use chrono::Local;

use super::{ChatMessage, Sender};

impl ChatMessage {
    pub fn new_assistant(text: String) -> Self {
        Self::at(Sender::Assistant, text, Local::now())
    }
}
