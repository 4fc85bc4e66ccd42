// src/ui/widgets/exit_popup.rs

use crate::app::App;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    text::Line,
};

/// Renders the exit warning on top of the existing UI.
///
/// Shown when the user asks to quit while downloads are still running.
/// `Clear` wipes the popup area first so the status area underneath does
/// not bleed through.
///
/// # Arguments
/// * `frame` - A mutable reference to the `Frame` used for rendering the TUI.
/// * `app` - The application state, for the number of running tasks.
/// * `area` - The `Rect` representing the total area available for rendering.
pub fn render_exit_popup(frame: &mut Frame, app: &App, area: Rect) {
    let text = Text::from(vec![
        Line::from("Warning".bold().yellow()),
        Line::from(""),
        Line::from("Please wait for all tasks to complete before closing the application."),
        Line::from(format!("Still running: {}", app.active_tasks())),
        Line::from(""),
        Line::from("Press any key to continue.".bold()),
    ]);

    let block = Block::default()
        .title("Warning")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let popup_area = centered_rect(60, 40, area);

    let popup = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}

/// Helper function to create a centered rectangle for a popup.
///
/// # Arguments
/// * `percent_x` - The desired width of the popup as a percentage of the parent area.
/// * `percent_y` - The desired height of the popup as a percentage of the parent area.
/// * `r` - The parent `Rect` to center the new area within.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
