//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the board of
//! calculator cards, and translates keyboard events into core::Action
//! values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Routing
//!
//! ```text
//! Ctrl+C ───────────────────────────────▶ quit
//! module manager open ──────────────────▶ ModuleManagerState
//! Ctrl+O ───────────────────────────────▶ open module manager
//! Tab / Shift+Tab ──────────────────────▶ Action::FocusNext / FocusPrev
//! wheel, PgUp / PgDn ───────────────────▶ BoardState
//! Esc ──────────────────────────────────▶ quit
//! everything else ──────────────────────▶ focused CardState
//! ```
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms waiting for input and
//! only redraws after an event.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::modules::{self, ModuleKey, ModuleLayout};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::calculators::build_cards;
use crate::tui::components::{BoardState, CardEvent, CardState, ModuleManagerEvent, ModuleManagerState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    /// One card per module in `ModuleKey::ALL` order, hidden ones included.
    pub cards: Vec<CardState>,
    pub board: BoardState,
    /// Module manager overlay (None = hidden)
    pub module_manager: Option<ModuleManagerState>,
}

impl TuiState {
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            cards: build_cards(config),
            board: BoardState::new(),
            module_manager: None,
        }
    }

    pub fn card_mut(&mut self, key: ModuleKey) -> Option<&mut CardState> {
        self.cards.iter_mut().find(|card| card.key() == key)
    }
}

/// The cards `layout` shows, in layout order.
pub fn visible_cards<'a>(cards: &'a [CardState], layout: &ModuleLayout) -> Vec<&'a CardState> {
    layout
        .visible()
        .into_iter()
        .filter_map(|key| cards.iter().find(|card| card.key() == key))
        .collect()
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Release events are filtered in event::map_event
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste
        );
    }
}

pub fn run(config: ResolvedConfig, layout: ModuleLayout) -> std::io::Result<()> {
    let mut tui = TuiState::new(&config);
    let mut app = App::new(layout, config);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();
    let mut needs_redraw = true;

    let result = loop {
        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(500));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain everything pending before the next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match dispatch(&mut app, &mut tui, event) {
                Effect::None => {}
                Effect::SaveLayout => persist_layout(&app.layout),
                Effect::Quit => {
                    should_quit = true;
                    break;
                }
            }
        }
        if should_quit {
            break Ok(());
        }
    };

    ratatui::restore();
    persist_layout(&app.layout);
    info!("bitbench exiting");
    result
}

fn persist_layout(layout: &ModuleLayout) {
    if let Err(e) = modules::save_layout(layout) {
        warn!("Failed to save module layout: {}", e);
    }
}

/// Route one event and return the effect the run loop must carry out.
fn dispatch(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    if matches!(event, TuiEvent::Resize) {
        return Effect::None;
    }
    if matches!(event, TuiEvent::ForceQuit) {
        return update(app, Action::Quit);
    }

    // When the module manager is open, route all events to it
    if let Some(manager) = tui.module_manager.as_mut() {
        let Some(manager_event) = manager.handle_event(&event, &app.layout) else {
            return Effect::None;
        };
        debug!("Module manager event: {:?}", manager_event);
        let effect = match manager_event {
            ModuleManagerEvent::Toggle(key) => update(app, Action::ToggleModule(key)),
            ModuleManagerEvent::Move { from, to } => update(app, Action::MoveModule { from, to }),
            ModuleManagerEvent::Reset => update(app, Action::ResetLayout),
            ModuleManagerEvent::Dismiss => {
                tui.module_manager = None;
                Effect::None
            }
        };
        tui.board.follow_focus = true;
        return effect;
    }

    match event {
        TuiEvent::OpenModuleManager => {
            tui.module_manager = Some(ModuleManagerState::new());
            Effect::None
        }
        TuiEvent::NextCard => {
            tui.board.follow_focus = true;
            update(app, Action::FocusNext)
        }
        TuiEvent::PrevCard => {
            tui.board.follow_focus = true;
            update(app, Action::FocusPrev)
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.board.handle_event(&event);
            Effect::None
        }
        TuiEvent::Escape => update(app, Action::Quit),
        _ => {
            let Some(key) = app.focused_module() else {
                return Effect::None;
            };
            let Some(card) = tui.card_mut(key) else {
                return Effect::None;
            };
            match card.handle_event(&event) {
                Some(CardEvent::Changed(_)) => {
                    // The readout may have grown; keep the card on screen
                    tui.board.follow_focus = true;
                    Effect::None
                }
                None => Effect::None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    fn setup() -> (App, TuiState) {
        let app = test_app();
        let tui = TuiState::new(&app.config);
        (app, tui)
    }

    #[test]
    fn test_visible_cards_follow_layout_order() {
        let (mut app, tui) = setup();
        app.layout.move_entry(10, 0);
        app.layout.set_visible(ModuleKey::Pow2, false);
        let keys: Vec<ModuleKey> = visible_cards(&tui.cards, &app.layout)
            .iter()
            .map(|card| card.key())
            .collect();
        assert_eq!(keys[0], ModuleKey::Xor);
        assert_eq!(keys[1], ModuleKey::Inverter);
        assert!(!keys.contains(&ModuleKey::Pow2));
    }

    #[test]
    fn test_typing_reaches_focused_card() {
        let (mut app, mut tui) = setup();
        dispatch(&mut app, &mut tui, TuiEvent::NextCard);
        dispatch(&mut app, &mut tui, TuiEvent::Backspace);
        dispatch(&mut app, &mut tui, TuiEvent::Backspace);
        dispatch(&mut app, &mut tui, TuiEvent::InputChar('8'));
        let pow2 = tui.card_mut(ModuleKey::Pow2).unwrap();
        assert_eq!(pow2.calculator.fields()[0].value(), "8");
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, mut tui) = setup();
        assert_eq!(dispatch(&mut app, &mut tui, TuiEvent::ForceQuit), Effect::Quit);
        assert_eq!(dispatch(&mut app, &mut tui, TuiEvent::Escape), Effect::Quit);
    }

    #[test]
    fn test_module_manager_captures_events() {
        let (mut app, mut tui) = setup();
        dispatch(&mut app, &mut tui, TuiEvent::OpenModuleManager);
        assert!(tui.module_manager.is_some());

        // Esc closes the overlay instead of quitting
        assert_eq!(dispatch(&mut app, &mut tui, TuiEvent::Escape), Effect::None);
        assert!(tui.module_manager.is_none());
    }

    #[test]
    fn test_module_manager_toggle_saves_layout() {
        let (mut app, mut tui) = setup();
        dispatch(&mut app, &mut tui, TuiEvent::OpenModuleManager);
        let effect = dispatch(&mut app, &mut tui, TuiEvent::InputChar(' '));
        assert_eq!(effect, Effect::SaveLayout);
        assert!(!app.layout.is_visible(ModuleKey::Inverter));
        assert_eq!(app.focused_module(), Some(ModuleKey::Pow2));
    }

    #[test]
    fn test_hidden_cards_keep_their_input() {
        let (mut app, mut tui) = setup();
        dispatch(&mut app, &mut tui, TuiEvent::InputChar('1'));
        app.layout.set_visible(ModuleKey::Inverter, false);
        app.layout.set_visible(ModuleKey::Inverter, true);
        let inverter = tui.card_mut(ModuleKey::Inverter).unwrap();
        assert_eq!(inverter.calculator.fields()[0].value(), "1");
    }
}
