//! # Actions
//!
//! Everything that can happen in bitbench becomes an `Action`.
//! User presses Tab? That's `Action::FocusNext`.
//! User hides a card in the module manager? That's `Action::ToggleModule(key)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing the I/O the caller should
//! perform. No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::debug;

use crate::core::modules::{ModuleKey, ModuleLayout};
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    FocusNext,
    FocusPrev,
    /// Focus a specific card if it is visible.
    FocusModule(ModuleKey),
    ToggleModule(ModuleKey),
    SetVisible(ModuleKey, bool),
    MoveModule { from: usize, to: usize },
    ResetLayout,
    SetStatus(String),
    Quit,
}

/// Work the caller must do after `update()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The module layout changed and should be written to disk.
    SaveLayout,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::FocusNext => {
            let count = app.layout.visible().len();
            if count > 0 {
                app.focus = (app.focus + 1) % count;
            }
            Effect::None
        }
        Action::FocusPrev => {
            let count = app.layout.visible().len();
            if count > 0 {
                app.focus = (app.focus + count - 1) % count;
            }
            Effect::None
        }
        Action::FocusModule(key) => {
            if let Some(idx) = app.layout.visible().iter().position(|k| *k == key) {
                app.focus = idx;
            }
            Effect::None
        }
        Action::ToggleModule(key) => {
            let focused = app.focused_module();
            app.layout.toggle(key);
            let shown = app.layout.is_visible(key);
            app.status_message = format!(
                "{} {}",
                key.title(),
                if shown { "shown" } else { "hidden" }
            );
            refocus(app, focused);
            Effect::SaveLayout
        }
        Action::SetVisible(key, visible) => {
            if app.layout.is_visible(key) == visible {
                return Effect::None;
            }
            let focused = app.focused_module();
            app.layout.set_visible(key, visible);
            refocus(app, focused);
            Effect::SaveLayout
        }
        Action::MoveModule { from, to } => {
            let focused = app.focused_module();
            if !app.layout.move_entry(from, to) {
                return Effect::None;
            }
            refocus(app, focused);
            Effect::SaveLayout
        }
        Action::ResetLayout => {
            app.layout = ModuleLayout::default();
            app.focus = 0;
            app.status_message = "Layout reset".to_string();
            Effect::SaveLayout
        }
        Action::SetStatus(message) => {
            app.status_message = message;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Keep focus on the same card after a layout change when it is still
/// visible; otherwise clamp.
fn refocus(app: &mut App, previously: Option<ModuleKey>) {
    match previously.and_then(|key| app.layout.visible().iter().position(|k| *k == key)) {
        Some(idx) => app.focus = idx,
        None => app.clamp_focus(),
    }
}
