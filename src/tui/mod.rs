//! Terminal user interface
//!
//! A synchronous crossterm event loop over the owned application state.
//! Downloads leave the alternate screen and hand the terminal to the
//! tool, then restore the UI and record the result in the history.

pub mod state;
pub mod view;

pub use state::{App, View};

use crate::runner::{ToolRunner, TOOL_NAME};
use crate::store::ConfigStore;
use crate::utils::naming::{display_name_for_url, find_downloaded_file};
use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use state::PendingAction;
use std::io::{self, Stdout};
use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::info;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Runs the interactive UI until the user quits.
pub fn run(store: ConfigStore, extra_args: Vec<String>) -> Result<()> {
    let mut app = App::new(store, extra_args);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| view::render(f, app))?;

        if let Some(PendingAction::Download { url }) = app.pending.take() {
            run_download(terminal, app, &url)?;
            continue;
        }

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                // a redraw happens on the next loop pass anyway
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if app.should_quit {
            info!("quitting");
            return Ok(());
        }
    }
}

/// Runs one download with the terminal handed over to the tool, then
/// restores the UI and records the outcome.
fn run_download(terminal: &mut Tui, app: &mut App, url: &str) -> Result<()> {
    let options = app.presets.resolve(&app.extra_args);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    let started = SystemTime::now();
    let outcome = ToolRunner::new().and_then(|runner| runner.run(url, &options));

    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    terminal.clear()?;

    match outcome {
        Ok(status) if status.success() => {
            let name = find_downloaded_file(Path::new("."), started)
                .unwrap_or_else(|| display_name_for_url(url));
            app.record_download(url, &name);
        }
        Ok(status) => {
            app.status = Some(format!("{TOOL_NAME} exited with {status}"));
        }
        Err(e) => {
            app.status = Some(format!("Download failed: {e}"));
        }
    }
    Ok(())
}
