// src/ui/layout.rs

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Defines the areas of the application's user interface.
///
/// Each `Rect` is the screen region of one widget, computed once per frame.
pub struct AppLayout {
    pub header: Rect,
    pub input: Rect,
    pub messages: Rect,
    pub footer: Rect,
}

/// Creates the complete application layout.
///
/// A single vertical stack: a one-line header, the three-row input box,
/// the status area taking all remaining space, and a one-line footer.
///
/// # Arguments
/// * `frame_size` - The `Rect` representing the total size of the terminal frame.
///
/// # Returns
/// An `AppLayout` struct containing the calculated `Rect` for each widget area.
pub fn create_layout(frame_size: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame_size);

    AppLayout {
        header: chunks[0],
        input: chunks[1],
        messages: chunks[2],
        footer: chunks[3],
    }
}
