// src/chat/chat_manager/mod.rs

mod calculate_max_scroll;

/// Lines moved per PageUp/PageDown.
pub const PAGE_SCROLL: usize = 10;

/// Manages chat UI state: the input line and how far the transcript is scrolled.
#[derive(Debug, Default)]
pub struct ChatManager {
    pub chat_input: String,
    /// Rows scrolled back from the newest content; 0 follows the tail.
    pub chat_scroll_offset: usize,
}

impl ChatManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_input(&mut self, ch: char) {
        self.chat_input.push(ch);
    }

    pub fn backspace(&mut self) {
        self.chat_input.pop();
    }

    pub fn clear_input(&mut self) {
        self.chat_input.clear();
    }

    pub fn get_input(&self) -> &str {
        &self.chat_input
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.chat_scroll_offset = self.chat_scroll_offset.saturating_add(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.chat_scroll_offset = self.chat_scroll_offset.saturating_sub(rows);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.chat_scroll_offset = 0;
    }

    pub fn is_following(&self) -> bool {
        self.chat_scroll_offset == 0
    }
}
