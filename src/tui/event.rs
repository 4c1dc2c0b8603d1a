use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Core actions (passed to core::update)
    ForceQuit, // Ctrl+C
    NextCard,  // Tab
    PrevCard,  // Shift+Tab

    // TUI-local events (handled directly in TUI)
    Escape,
    OpenModuleManager, // Ctrl+O
    InputChar(char),
    Paste(String),
    Backspace,
    Delete,
    Submit,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    Home,
    End,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(event) => map_event(event),
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            None
        }
    }
}

fn map_event(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            // Keyboard enhancement reports releases too; act on presses only
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (KeyModifiers::CONTROL, KeyCode::Char('o')) => Some(TuiEvent::OpenModuleManager),
                (_, KeyCode::BackTab) => Some(TuiEvent::PrevCard),
                (m, KeyCode::Tab) if m.contains(KeyModifiers::SHIFT) => Some(TuiEvent::PrevCard),
                (_, KeyCode::Tab) => Some(TuiEvent::NextCard),
                (m, KeyCode::Char(_)) if m.contains(KeyModifiers::CONTROL) => None,
                (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Delete) => Some(TuiEvent::Delete),
                (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
                (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
                (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
                (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
                (_, KeyCode::Home) => Some(TuiEvent::Home),
                (_, KeyCode::End) => Some(TuiEvent::End),
                (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
                (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}
