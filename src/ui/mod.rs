pub mod chat_screen;
pub mod style;
pub mod transcript;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::Widget,
};
use crate::app::App;
use crate::ui::chat_screen::render_chat_screen;

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        render_chat_screen(self, area, buf);
    }
}
