// src/ui/widgets/header.rs

use ratatui::{prelude::*, widgets::Paragraph};

pub const ACCENT: Color = Color::Rgb(0x9A, 0x6C, 0xFF);

pub fn render_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled("🎶 Tab Downloader 🎶", Style::new().bold().fg(ACCENT)),
        Span::styled(concat!("  v", env!("CARGO_PKG_VERSION")), Style::new().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(title).alignment(Alignment::Center), area);
}
