use chrono::Local;

use super::{ChatMessage, Sender};

impl ChatMessage {
    pub fn new_user(text: String) -> Self {
        Self::at(Sender::User, text, Local::now())
    }
}
