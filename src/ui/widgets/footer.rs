// src/ui/widgets/footer.rs

use crate::app::{App, AppState};
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Renders the footer widget, which displays available actions.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::new().bold().fg(Color::Yellow));

    let spans = match app.state {
        AppState::Idle => Line::from(vec![
            Span::raw("Press "),
            key("Enter"),
            Span::raw(" to download, "),
            key("Esc"),
            Span::raw(" to quit."),
        ]),
        AppState::Processing => Line::from(vec![
            Span::raw(format!("Working on {} download(s)... ", app.active_tasks())),
            key("Enter"),
            Span::raw(" starts another, "),
            key("Esc"),
            Span::raw(" quits when done."),
        ]),
    };

    let footer = Paragraph::new(spans).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
