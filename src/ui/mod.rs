//! UI components module.
//!
//! Contains ratatui widgets for displaying the application interface.

pub mod header;
pub mod status;
pub mod stories;

pub use header::render_header;
pub use status::render_status;
pub use stories::{article_at, render_stories};

use crate::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

/// Render the complete UI.
///
/// # Arguments
/// * `f` - Frame to render to
/// * `app` - Application state
///
/// # Returns
/// * `Rect` - Area of the story list, for mouse hit-testing
pub fn render(f: &mut Frame, app: &App) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Story list
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_header(chunks[0], f.buffer_mut());
    render_stories(app, chunks[1], f.buffer_mut());
    render_status(app, chunks[2], f.buffer_mut());

    chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::models::test_story;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 40)).unwrap();
        terminal
            .draw(|f| {
                render(f, app);
            })
            .unwrap();
        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_full_screen_loading() {
        let app = App::new();
        let text = screen(&app);
        assert!(text.contains("UK News Decoded"));
        assert!(text.contains("One story. Multiple sources."));
        assert!(text.contains("Loading stories…"));
        assert!(text.contains("q quit"));
    }

    #[test]
    fn test_full_screen_loaded() {
        let mut app = App::new();
        app.set_stories(vec![test_story("pair", 2)]);
        app.set_status("Loaded 1 stories (2 articles)".to_string());
        let text = screen(&app);
        assert!(!text.contains("Loading stories"));
        assert!(text.contains("Topic pair"));
        assert!(text.contains("Loaded 1 stories"));
    }

    #[test]
    fn test_refresh_keeps_list_visible() {
        let mut app = App::new();
        app.set_stories(vec![test_story("pair", 2)]);
        app.load_state = crate::app::LoadState::Loading;
        let text = screen(&app);
        assert!(text.contains("Topic pair"));
        assert!(text.contains("Refreshing stories…"));
        assert!(!text.contains("Loading stories"));
    }
}
