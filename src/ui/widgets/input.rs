// src/ui/widgets/input.rs
use ratatui::{prelude::*, widgets::{Block, Borders, Paragraph}};
use crate::app::App;
use super::header::ACCENT;

/// Renders the input box widget.
///
/// Long links scroll horizontally so the cursor stays visible.
pub fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title("Enter the link");

    let inner_width = area.width.saturating_sub(2) as usize;
    let typed = app.input.chars().count();
    let hidden = typed.saturating_sub(inner_width.saturating_sub(1));
    let visible: String = app.input.chars().skip(hidden).collect();

    let input_paragraph = Paragraph::new(visible.as_str())
        .block(input_block)
        .style(Style::default().fg(Color::White));
    frame.render_widget(input_paragraph, area);

    // The input stays editable while downloads run, so the cursor is hidden
    // only behind the exit warning.
    if !app.show_exit_warning {
        frame.set_cursor_position((
            area.x + (typed - hidden) as u16 + 1,
            area.y + 1,
        ));
    }
}
