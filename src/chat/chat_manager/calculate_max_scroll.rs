use super::ChatManager;

impl ChatManager {
    /// Largest useful offset for `total_rows` of rendered transcript shown in
    /// `visible_height` rows.
    pub fn calculate_max_scroll(total_rows: usize, visible_height: usize) -> usize {
        total_rows.saturating_sub(visible_height)
    }

    /// Pulls the offset back inside the content after a resize or a long scroll.
    pub fn clamp_scroll(&mut self, total_rows: usize, visible_height: usize) -> usize {
        let max_scroll = Self::calculate_max_scroll(total_rows, visible_height);
        self.chat_scroll_offset = self.chat_scroll_offset.min(max_scroll);
        self.chat_scroll_offset
    }
}
