mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use controller::ListController;
use model::FlickrClient;
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Flickr TUI Starting ===");

    let api_key = std::env::var("FLICKR_API_KEY")
        .context("FLICKR_API_KEY must be set to a Flickr API key")?;
    let client = FlickrClient::new(api_key)?;

    let controller = ListController::new(Arc::new(client));

    // First load browses recent photos, the same screen the user sees
    // before any search text has been typed.
    controller.set_query(String::new());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Flickr TUI shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: ListController,
) -> io::Result<()> {
    let mut state_rx = controller.subscribe();

    loop {
        let size = terminal.size()?;
        controller.set_grid_columns(AppView::grid_columns(size.width)).await;

        // Snapshot state for this frame
        let ui_state = controller.ui_snapshot().await;
        let photos = controller.current_results().await;
        let list_state = state_rx.borrow_and_update().clone();

        terminal.draw(|f| {
            AppView::render(f, &ui_state, &list_state, &photos);
        })?;

        // Handle input with a short poll time for smooth state updates
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                let _ = controller.handle_key_event(key).await;
            }
        }

        if ui_state.should_quit {
            break;
        }
    }

    Ok(())
}
