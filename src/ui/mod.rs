// src/ui/mod.rs

use crate::app::App;
use ratatui::prelude::*;

mod layout;
mod widgets;

pub fn render(app: &mut App, frame: &mut Frame) {
    let layout = layout::create_layout(frame.area());

    widgets::header::render_header(frame, layout.header);
    widgets::input::render_input(frame, app, layout.input);
    widgets::log_view::render_log_view(frame, app, layout.messages);
    widgets::footer::render_footer(frame, app, layout.footer);

    // The warning sits on top of everything else until dismissed.
    if app.show_exit_warning {
        let area = frame.area();
        widgets::exit_popup::render_exit_popup(frame, app, area);
    }
}
