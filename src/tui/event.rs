use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

use crate::core::action::Action;
use crate::core::viewport::ScrollDirection;

/// Block until the next terminal event and translate it. Events with no
/// binding come back as `None`.
pub fn read_action() -> io::Result<Option<Action>> {
    let event = event::read()?;
    Ok(map_event(event))
}

/// Translate a raw terminal event into a core action.
pub fn map_event(event: Event) -> Option<Action> {
    match event {
        Event::Key(key_event) => map_key(key_event),
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(Action::Wheel(ScrollDirection::Up)),
            MouseEventKind::ScrollDown => Some(Action::Wheel(ScrollDirection::Down)),
            _ => None,
        },
        Event::Resize(width, height) => Some(Action::Resize { width, height }),
        _ => None,
    }
}

fn map_key(key_event: KeyEvent) -> Option<Action> {
    // Terminals reporting release/repeat kinds would otherwise double every key.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    log::debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code,
        key_event.modifiers
    );
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
        (KeyModifiers::CONTROL, KeyCode::Char('d')) => Some(Action::HalfPageDown),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => Some(Action::HalfPageUp),
        (KeyModifiers::CONTROL, _) => None,
        (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => Some(Action::Quit),
        (_, KeyCode::Char('j')) | (_, KeyCode::Down) => Some(Action::MoveDown),
        (_, KeyCode::Char('k')) | (_, KeyCode::Up) => Some(Action::MoveUp),
        (_, KeyCode::Char('d')) => Some(Action::HalfPageDown),
        (_, KeyCode::Char('u')) => Some(Action::HalfPageUp),
        (_, KeyCode::PageDown) => Some(Action::PageDown),
        (_, KeyCode::PageUp) => Some(Action::PageUp),
        (_, KeyCode::Char('n')) => Some(Action::NewNote),
        (_, KeyCode::Enter) => Some(Action::Open),
        _ => None,
    }
}
