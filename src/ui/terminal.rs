use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::info;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::app::App;
use crate::input::{KeySource, TerminalKeys};

/// How long to wait for a key before redrawing anyway.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Spin up the terminal backend, enter the draw loop, and keep processing input
/// until the user quits.
pub fn run_app(app: &mut App) -> Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal backend")?;

    let result = TerminalKeys::register().and_then(|mut keys| event_loop(&mut terminal, app, &mut keys));

    cleanup_terminal(&mut terminal)?;
    result
}

/// Draw, wait for a key, apply it. Generic over the key source so the loop can
/// be replayed from a script.
pub fn event_loop<B, K>(terminal: &mut Terminal<B>, app: &mut App, keys: &mut K) -> Result<()>
where
    B: ratatui::backend::Backend,
    K: KeySource + ?Sized,
{
    app.set_legacy_keyboard(!keys.reports_key_releases());
    loop {
        terminal
            .draw(|frame| app.draw(frame))
            .context("failed to draw frame")?;

        if let Some(input) = keys.next_key(POLL_INTERVAL)? {
            if app.handle_input(input) {
                info!("quit requested");
                return Ok(());
            }
        }
    }
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal
        .show_cursor()
        .context("failed to restore cursor visibility")
}
