// src/ui/widgets/log_view.rs

use crate::app::App;
use crate::core::models::{MessageKind, StatusMessage};
use super::header::ACCENT;
use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, Wrap},
};

/// Color of each message category.
fn kind_style(kind: MessageKind) -> Style {
    match kind {
        MessageKind::Info => Style::default().fg(ACCENT),
        MessageKind::Success => Style::default().fg(Color::Green),
        MessageKind::Error => Style::default().fg(Color::Red),
    }
}

/// One status message as a styled line: a gray timestamp, then the text in
/// its category color.
fn message_line(message: &StatusMessage) -> Line<'_> {
    Line::from(vec![
        Span::styled(message.at.format("%H:%M:%S ").to_string(), Style::default().fg(Color::DarkGray)),
        Span::styled(message.text.as_str(), kind_style(message.kind)),
    ])
}

/// Terminal rows `message` takes once wrapped to `width` columns.
fn wrapped_rows(message: &StatusMessage, width: u16) -> usize {
    Paragraph::new(message_line(message))
        .wrap(Wrap { trim: false })
        .line_count(width)
}

/// First wrapped row to show so that the message at `selected` ends on the
/// last row of `area` once the content overflows it.
fn first_visible_row(messages: &[StatusMessage], selected: usize, area: Rect) -> u16 {
    let through_selected: usize = messages
        .iter()
        .take(selected.saturating_add(1))
        .map(|message| wrapped_rows(message, area.width))
        .sum();
    let top = through_selected.saturating_sub(area.height as usize);
    u16::try_from(top).unwrap_or(u16::MAX)
}

/// Renders the status area.
///
/// Messages from every running download land here in arrival order. The
/// view follows the newest line unless the user scrolls with ↑ ↓.
///
/// # Arguments
///
/// * `frame` - The mutable frame to render onto.
/// * `app` - The application state holding the messages and scroll state.
/// * `area` - The `Rect` in which to render this widget.
pub fn render_log_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title("Status (scroll with ↑ ↓)")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let top = first_visible_row(&app.messages, app.scroll_offset, inner_area);
    let lines: Vec<Line> = app.messages.iter().map(message_line).collect();

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((top, 0));
    frame.render_widget(paragraph, inner_area);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None);
    frame.render_stateful_widget(scrollbar, inner_area, &mut app.messages_scroll_state);
}
