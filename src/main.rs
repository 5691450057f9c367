//! UK News Decoded - terminal client for cross-source UK news stories.
//!
//! Main entry point and event loop for the application.

mod app;
mod bias;
mod browser;
mod config;
mod logging;
mod news;
mod sources;
mod ui;

use app::App;
use config::Config;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use news::NewsClient;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io;
use std::time::Duration;
use tracing::{info, warn};

/// Main application entry point.
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Loads configuration, starts logging, spawns the stories fetch and runs
/// the event loop. The fetch resolves in the background while the
/// loading screen is shown.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load(None)?;

    let _log_guard = logging::init_logging(&config.log_file_path()?)?;

    // Write defaults on first run so there is a file to edit
    let config_path = Config::default_config_path()?;
    if !config_path.exists() {
        match config.save(Some(&config_path)) {
            Ok(()) => info!(path = %config_path.display(), "wrote default config"),
            Err(e) => warn!(error = %e, "could not write default config"),
        }
    }

    let client = NewsClient::new(&config)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %client.base_url(),
        "news-decoded starting"
    );

    let mut app = App::new();
    app.start_fetch(&client);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    app.cancel_fetch();
    info!("news-decoded exiting");

    result
}

/// Main event loop.
///
/// # Arguments
/// * `terminal` - Terminal instance
/// * `app` - Application state
/// * `client` - Stories backend client, used for refreshes
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Applies a finished fetch before each frame, then handles keyboard and
/// mouse events.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &NewsClient,
) -> anyhow::Result<()> {
    let mut list_area = Rect::default();

    loop {
        app.poll_fetch().await;

        terminal.draw(|f| {
            list_area = ui::render(f, app);
        })?;

        // Non-blocking poll keeps the loop free to pick up the fetch result
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break,
                    KeyCode::Up | KeyCode::Char('k') => app.move_up(),
                    KeyCode::Down | KeyCode::Char('j') => app.move_down(),
                    KeyCode::Home | KeyCode::Char('g') => app.select_first(),
                    KeyCode::End | KeyCode::Char('G') => app.select_last(),
                    KeyCode::Enter => open_selected(app),
                    KeyCode::Char('r') => {
                        if app.start_fetch(client) {
                            app.set_status("Refreshing stories…".to_string());
                        }
                    }
                    _ => {}
                }
            }
            Event::Mouse(mouse) => handle_mouse_event(mouse, app, list_area),
            _ => {}
        }
    }

    Ok(())
}

/// Handle mouse events (scroll and click).
///
/// # Arguments
/// * `mouse` - Mouse event
/// * `app` - Application state
/// * `list_area` - Area of the story list widget
///
/// # Details
/// Scrolling moves the selection; a left click selects and opens the
/// article under the pointer.
fn handle_mouse_event(mouse: MouseEvent, app: &mut App, list_area: Rect) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.move_up(),
        MouseEventKind::ScrollDown => app.move_down(),
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = ui::article_at(app, list_area, mouse.column, mouse.row) {
                app.select(index);
                open_selected(app);
            }
        }
        _ => {}
    }
}

/// Open the selected article in the browser and report the outcome.
fn open_selected(app: &mut App) {
    let Some(article) = app.selected_article() else {
        return;
    };
    let url = article.url.clone();
    let headline = article.headline.clone();

    match browser::open_article(&url) {
        Ok(()) => app.set_status(format!("Opened: {}", headline)),
        Err(e) => {
            warn!(error = %e, %url, "failed to open article");
            app.set_status(format!("Failed to open article: {}", e));
        }
    }
}
