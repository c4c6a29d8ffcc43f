use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Text},
    widgets::{Block, BorderType, Paragraph, Widget},
};

use crate::app::App;
use crate::ui::style::{self, dim_unless_focused};
use crate::ui::transcript::render_transcript;

pub const TITLE: &str = "Indian Culture Explorer";
pub const SUBTITLE: &str = "Explore the rich heritage and traditions of India";

pub fn render_chat_screen(app: &mut App, area: Rect, buf: &mut Buffer) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Title
            Constraint::Min(3),     // Transcript
            Constraint::Length(3),  // Input box
            Constraint::Length(3),  // Help
        ])
        .split(area);

    // Title
    let header = Paragraph::new(Text::from(vec![
        Line::styled(TITLE, Style::default().fg(style::ACCENT).add_modifier(Modifier::BOLD)),
        Line::styled(SUBTITLE, Style::default().fg(style::TEXT)),
    ]))
    .block(Block::bordered().border_type(BorderType::Rounded))
    .alignment(Alignment::Center);
    header.render(main_layout[0], buf);

    // Transcript
    render_transcript(&app.transcript, &mut app.chat_manager, main_layout[1], buf);

    // Input box
    let waiting = app.is_waiting();
    let input_title = if waiting { "Waiting for reply..." } else { "Ask" };
    let input_widget = Paragraph::new(format!("> {}", app.chat_manager.get_input()))
        .block(
            Block::bordered()
                .title(input_title)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(style::ACCENT))
        )
        .style(dim_unless_focused(!waiting, Style::default().fg(style::TEXT)));
    input_widget.render(main_layout[2], buf);

    // Help
    let help = Paragraph::new("Enter: Ask • ↑↓/PgUp/PgDn: Scroll • Esc: Quit")
        .block(
            Block::bordered()
                .title("Controls")
                .border_type(BorderType::Rounded)
        )
        .fg(style::TEXT)
        .alignment(Alignment::Center);
    help.render(main_layout[3], buf);
}
