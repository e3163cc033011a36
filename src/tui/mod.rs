//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates terminal events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop blocks on the next terminal event and
//! redraws after each one.
//!
//! ## Editor Hand-off
//!
//! When the core asks for the editor, the terminal is fully suspended
//! (raw mode off, main screen, cursor visible, mouse released) so the editor
//! owns it. Once the editor exits the terminal is taken back, cleared, and
//! the exit is reported to the core as `Action::EditorExited`.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info};
use std::io::stdout;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::DefaultTerminal;

use crate::core::action::{Action, Effect, EditorRequest, update};
use crate::core::state::{App, Phase};
use crate::error::Result;
use crate::tui::event::read_action;

pub use crate::tui::markdown::MarkdownRenderer;

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Run the browser until the user quits or opens a note. The terminal is
/// restored before any error is returned.
pub fn run(app: &mut App) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new()
        .map_err(Into::into)
        .and_then(|_guard| event_loop(&mut terminal, app));
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    // Not every terminal reports its size on startup, so ask once.
    let (width, height) = crossterm::terminal::size()?;
    let mut pending = Some(Action::Resize { width, height });

    loop {
        if let Some(action) = pending.take() {
            debug!("Event loop received: {:?}", action);
            let mut effect = update(app, action)?;

            while let Effect::LaunchEditor(request) = effect {
                let exited = run_editor(terminal, app, request)?;
                effect = update(app, exited)?;
            }

            if effect == Effect::Quit || app.phase == Phase::Terminating {
                info!("Session finished");
                return Ok(());
            }
        }

        terminal.draw(|f| ui::draw_ui(f, app))?;
        pending = read_action()?;
    }
}

/// Hand the terminal to the editor and wait for it. Returns the action
/// reporting how the editor exited.
fn run_editor(
    terminal: &mut DefaultTerminal,
    app: &App,
    request: EditorRequest,
) -> Result<Action> {
    debug!("Suspending terminal for {:?}", request.intent);
    execute!(terminal.backend_mut(), DisableMouseCapture)?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let launched = app.editor.launch(&request.path);

    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen, EnableMouseCapture)?;
    terminal.clear()?;

    Ok(Action::EditorExited {
        intent: request.intent,
        outcome: launched?,
    })
}
