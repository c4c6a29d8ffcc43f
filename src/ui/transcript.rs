// src/ui/transcript.rs

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Text},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use crate::chat::{ChatManager, ChatMessage, Transcript};
use crate::ui::style::{self, sender_style};

/// Lines for one entry: `[HH:MM] You: first line`, any continuation lines,
/// then a blank separator. Every line carries the sender's color.
pub fn message_lines(message: &ChatMessage) -> Vec<Line<'static>> {
    let style = sender_style(message.sender());
    let header = message.header_line();

    let mut lines: Vec<Line<'static>> = header
        .lines()
        .map(|line| Line::styled(line.to_string(), style))
        .collect();
    lines.push(Line::from(""));
    lines
}

pub fn transcript_text(transcript: &Transcript) -> Text<'static> {
    if transcript.is_empty() {
        return Text::from(vec![
            Line::styled("Ask anything about India's festivals, food, music, languages and history.", Style::default().fg(style::TEXT)),
            Line::from(""),
            Line::styled("Try: 'What is Diwali?' or 'Tell me about Kathakali'", Style::default().fg(style::TEXT)),
        ]);
    }

    let lines: Vec<Line<'static>> = transcript
        .messages()
        .iter()
        .flat_map(message_lines)
        .collect();
    Text::from(lines)
}

/// Draws the transcript pane. The viewport follows the newest entry unless the
/// user has scrolled back; the stored offset is clamped to the content here.
pub fn render_transcript(
    transcript: &Transcript,
    chat_manager: &mut ChatManager,
    area: Rect,
    buf: &mut Buffer,
) {
    let title = if chat_manager.is_following() {
        "Conversation (↑↓ to scroll)".to_string()
    } else {
        format!("Conversation (↑{} rows, ↓ to return)", chat_manager.chat_scroll_offset)
    };
    let block = Block::bordered()
        .title(title)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(style::ACCENT));
    let inner = block.inner(area);
    block.render(area, buf);

    let paragraph = Paragraph::new(transcript_text(transcript))
        .style(Style::default().bg(style::BACKGROUND))
        .wrap(Wrap { trim: false });

    let total_rows = paragraph.line_count(inner.width);
    let visible = inner.height as usize;
    let offset = chat_manager.clamp_scroll(total_rows, visible);
    let top = ChatManager::calculate_max_scroll(total_rows, visible) - offset;

    paragraph
        .scroll((top.min(u16::MAX as usize) as u16, 0))
        .render(inner, buf);
}
