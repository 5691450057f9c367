//! Header widget rendering.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Render the application title and tagline.
pub fn render_header(area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled(
            "UK News Decoded",
            Style::default()
                .fg(Color::Rgb(244, 244, 245))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "One story. Multiple sources.",
            Style::default().fg(Color::Rgb(161, 161, 170)),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    Widget::render(paragraph, area, buf);
}
