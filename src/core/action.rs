//! # Actions
//!
//! Everything that can happen in the browser becomes an `Action`.
//! User presses `j`? That's `Action::MoveDown`.
//! Terminal resized? That's `Action::Resize { width, height }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state in place, and returns an `Effect` the event loop must carry
//! out. The only effect with real side effects is launching the editor;
//! when it returns, the loop reports back with `Action::EditorExited`.
//!
//! ```text
//! State + Action  →  update()  →  State' + Effect
//! ```
//!
//! ## Transitions
//!
//! ```text
//! Initializing ──Resize──► Ready ──Quit / EditorExited(Open)──► Terminating
//!                            │ ▲
//!                            └─┘ moves, scrolls, resizes, new note
//! ```
//!
//! Only `Resize` is meaningful while initializing. Nothing is meaningful
//! once terminating.

use std::path::PathBuf;

use log::{debug, info, warn};

use crate::core::editor::EditorOutcome;
use crate::core::state::{App, Phase};
use crate::core::viewport::{ScrollDirection, WHEEL_STEP};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Terminal size report. The first one lays out the panes.
    Resize { width: u16, height: u16 },
    MoveDown,
    MoveUp,
    HalfPageDown,
    HalfPageUp,
    PageDown,
    PageUp,
    /// Mouse wheel over the reader pane.
    Wheel(ScrollDirection),
    NewNote,
    Open,
    Quit,
    /// The editor launched for `intent` has exited.
    EditorExited {
        intent: EditIntent,
        outcome: EditorOutcome,
    },
}

/// Why the editor was launched. Decides what happens once it exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditIntent {
    /// Create a note; browsing continues afterwards.
    NewNote,
    /// Edit the selected note; the session always ends afterwards.
    Open,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorRequest {
    pub intent: EditIntent,
    pub path: PathBuf,
}

/// Work the event loop must do after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Leave the loop and restore the terminal.
    Quit,
    /// Suspend the UI, run the editor to completion, then send
    /// `Action::EditorExited`.
    LaunchEditor(EditorRequest),
}

/// Apply one action. Errors are fatal to the session (unreadable note,
/// renderer failure).
pub fn update(app: &mut App, action: Action) -> Result<Effect> {
    match app.phase {
        Phase::Initializing => match action {
            Action::Resize { width, height } => {
                initialize(app, width, height)?;
                Ok(Effect::None)
            }
            other => {
                debug!("Ignoring {:?} before first resize", other);
                Ok(Effect::None)
            }
        },
        Phase::Ready => update_ready(app, action),
        Phase::Terminating => Ok(Effect::None),
    }
}

fn initialize(app: &mut App, width: u16, height: u16) -> Result<()> {
    app.resize_panes(width, height);
    app.refresh_list();
    app.refresh_reader()?;
    app.phase = Phase::Ready;
    info!(
        "Ready: {} notes, terminal {}x{}",
        app.index.len(),
        width,
        height
    );
    Ok(())
}

fn update_ready(app: &mut App, action: Action) -> Result<Effect> {
    match action {
        Action::Quit => {
            app.phase = Phase::Terminating;
            Ok(Effect::Quit)
        }
        // Sizes only. Cached renders keep the width they were made at.
        Action::Resize { width, height } => {
            app.resize_panes(width, height);
            Ok(Effect::None)
        }
        Action::MoveDown => move_selection(app, ScrollDirection::Down),
        Action::MoveUp => move_selection(app, ScrollDirection::Up),
        Action::HalfPageDown => {
            app.reader.scroll_half_page(ScrollDirection::Down);
            Ok(Effect::None)
        }
        Action::HalfPageUp => {
            app.reader.scroll_half_page(ScrollDirection::Up);
            Ok(Effect::None)
        }
        Action::PageDown => {
            app.reader.scroll_page(ScrollDirection::Down);
            Ok(Effect::None)
        }
        Action::PageUp => {
            app.reader.scroll_page(ScrollDirection::Up);
            Ok(Effect::None)
        }
        Action::Wheel(direction) => {
            app.reader.scroll_lines(direction, WHEEL_STEP);
            Ok(Effect::None)
        }
        Action::NewNote => Ok(Effect::LaunchEditor(EditorRequest {
            intent: EditIntent::NewNote,
            path: app.new_note_path.clone(),
        })),
        Action::Open => match app.index.current() {
            Some(note) => Ok(Effect::LaunchEditor(EditorRequest {
                intent: EditIntent::Open,
                path: note.path.clone(),
            })),
            None => Ok(Effect::None),
        },
        Action::EditorExited { intent, outcome } => Ok(editor_exited(app, intent, outcome)),
    }
}

fn move_selection(app: &mut App, direction: ScrollDirection) -> Result<Effect> {
    let delta = match direction {
        ScrollDirection::Down => 1,
        ScrollDirection::Up => -1,
    };
    if !app.index.move_by(delta) {
        return Ok(Effect::None);
    }
    app.refresh_list();
    app.list.scroll_line(direction);
    app.refresh_reader()?;
    Ok(Effect::None)
}

fn editor_exited(app: &mut App, intent: EditIntent, outcome: EditorOutcome) -> Effect {
    match intent {
        // Editing means browsing is over, whatever the editor reported.
        EditIntent::Open => {
            if !outcome.success {
                info!("Editor exited with {:?}; ending session anyway", outcome.code);
            }
            app.phase = Phase::Terminating;
            Effect::Quit
        }
        EditIntent::NewNote => {
            if !outcome.success {
                warn!("Editor for new note exited with {:?}", outcome.code);
            }
            Effect::None
        }
    }
}
