/*
 * Terminal UI driver.
 * Sets up crossterm raw mode and the alternate screen, runs the single-threaded
 * draw/poll/dispatch loop and restores the terminal on the way out.
 */

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info};

use crate::app::{App, AppEvent};
use crate::core::Result;
use crate::ui;

type TuiTerminal = Terminal<CrosstermBackend<Stdout>>;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Runs the interactive cheatsheet until the user quits.
pub fn run(app: &mut App<'_>) -> Result<()> {
    let mut terminal = init_terminal()?;
    let outcome = run_loop(&mut terminal, app);
    if let Err(e) = restore_terminal(&mut terminal) {
        error!("Failed to restore terminal: {}", e);
    }
    outcome
}

fn init_terminal() -> Result<TuiTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut TuiTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_loop(terminal: &mut TuiTerminal, app: &mut App<'_>) -> Result<()> {
    let size = terminal.size()?;
    app.handle_event(AppEvent::Resize(size.width, size.height));
    info!("Entering event loop");

    while !app.should_quit() {
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                app.handle_event(AppEvent::Key(key));
            }
            Event::Resize(width, height) => app.handle_event(AppEvent::Resize(width, height)),
            _ => {}
        }
    }

    info!("Leaving event loop");
    Ok(())
}
