//! Status bar rendering.
//!
//! Shows the last status message, or key hints when there is none.

use crate::app::{App, LoadState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const KEY_HINTS: &str = "q quit | j/k move | g/G first/last | Enter open | r refresh";

/// Render the status bar.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// While a refresh runs over an existing list, a refresh notice takes
/// precedence over the last message. After a failed fetch the line
/// always carries the fetch error, whatever was reported since.
pub fn render_status(app: &App, area: Rect, buf: &mut Buffer) {
    let (text, style) = if app.is_loading() && !app.stories.is_empty() {
        (
            "Refreshing stories…".to_string(),
            Style::default().fg(Color::Yellow),
        )
    } else if let LoadState::Failed { message, .. } = &app.load_state {
        (
            format!("Error loading stories: {} | press 'r' to retry", message),
            Style::default().fg(Color::Red),
        )
    } else {
        (
            app.status_message
                .as_deref()
                .unwrap_or(KEY_HINTS)
                .to_string(),
            Style::default().fg(Color::Gray),
        )
    };

    Paragraph::new(Line::from(Span::styled(text, style))).render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::models::test_story;

    fn status_line(app: &App) -> String {
        let area = Rect::new(0, 0, 120, 1);
        let mut buf = Buffer::empty(area);
        render_status(app, area, &mut buf);
        (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect::<String>()
    }

    #[test]
    fn test_failure_line_uses_fetch_error() {
        let mut app = App::new();
        app.set_stories(vec![test_story("pair", 2)]);
        app.load_state = LoadState::Failed {
            message: "backend returned 502 Bad Gateway".to_string(),
            backend_healthy: None,
        };
        app.set_status("Opened: Headline pair-0".to_string());

        let line = status_line(&app);
        assert!(line.contains("Error loading stories: backend returned 502 Bad Gateway"));
        assert!(line.contains("press 'r' to retry"));
        assert!(!line.contains("Opened:"));
    }

    #[test]
    fn test_loaded_line_shows_last_message() {
        let mut app = App::new();
        app.set_stories(vec![test_story("pair", 2)]);
        assert!(status_line(&app).contains("q quit"));

        app.set_status("Opened: Headline pair-0".to_string());
        assert!(status_line(&app).contains("Opened: Headline pair-0"));
    }
}
