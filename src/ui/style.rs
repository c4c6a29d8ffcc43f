use ratatui::style::{Color, Style, Stylize};

use crate::chat::Sender;

pub const BACKGROUND: Color = Color::Rgb(0xFF, 0xF5, 0xE6); // light cream
pub const ACCENT: Color = Color::Rgb(0xFF, 0x6B, 0x6B); // warm red
pub const TEXT: Color = Color::Rgb(0x2C, 0x3E, 0x50); // dark blue-grey

pub const USER: Color = Color::Rgb(0x29, 0x80, 0xB9); // blue
pub const ASSISTANT: Color = Color::Rgb(0x27, 0xAE, 0x60); // green
pub const SYSTEM: Color = Color::Rgb(0xC0, 0x39, 0x2B); // red

/// Transcript color for an entry. Depends on nothing but the sender.
pub const fn sender_color(sender: Sender) -> Color {
    match sender {
        Sender::User => USER,
        Sender::Assistant => ASSISTANT,
        Sender::System => SYSTEM,
    }
}

pub fn sender_style(sender: Sender) -> Style {
    Style::default().fg(sender_color(sender))
}

pub fn dim_unless_focused(is_focused: bool, style: Style) -> Style {
    if is_focused { style.bold() } else { style.dim().italic() }
}
