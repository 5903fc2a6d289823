use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    Quit,
    Resize,
    Escape,
    Submit,
    InputChar(char),
    Backspace,
    CursorLeft,
    CursorRight,
    MoveUp,
    MoveDown,
    ScrollUp,
    ScrollDown,
}

fn map_key_event(key_event: KeyEvent) -> AppEvent {
    if key_event.kind != KeyEventKind::Press {
        return AppEvent::Tick;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return match key_event.code {
            KeyCode::Char('c') | KeyCode::Char('d') => AppEvent::Quit,
            _ => AppEvent::Tick,
        };
    }

    match key_event.code {
        KeyCode::Esc => AppEvent::Escape,
        KeyCode::Enter => AppEvent::Submit,
        KeyCode::Backspace => AppEvent::Backspace,
        KeyCode::Left => AppEvent::CursorLeft,
        KeyCode::Right => AppEvent::CursorRight,
        KeyCode::Up => AppEvent::MoveUp,
        KeyCode::Down => AppEvent::MoveDown,
        KeyCode::PageUp => AppEvent::ScrollUp,
        KeyCode::PageDown => AppEvent::ScrollDown,
        KeyCode::Char(c) => AppEvent::InputChar(c),
        _ => AppEvent::Tick,
    }
}

/// Waits briefly for one terminal event. A quiet interval yields `Tick`.
pub fn next_event() -> io::Result<AppEvent> {
    if event::poll(POLL_INTERVAL)? {
        match event::read()? {
            Event::Key(key_event) => return Ok(map_key_event(key_event)),
            Event::Resize(_, _) => return Ok(AppEvent::Resize),
            _ => {}
        }
    }
    Ok(AppEvent::Tick)
}
