//! # Application State
//!
//! Core business state for bitbench. This module contains domain logic only -
//! no TUI-specific types. Presentation state (field buffers, scroll offsets,
//! overlays) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── layout: ModuleLayout      // which cards are shown, in what order
//! ├── config: ResolvedConfig    // pad widths, strict Boolean mode, ...
//! ├── status_message: String    // status bar text
//! └── focus: usize              // index into layout.visible()
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::core::config::ResolvedConfig;
use crate::core::modules::{ModuleKey, ModuleLayout};

pub struct App {
    pub layout: ModuleLayout,
    pub config: ResolvedConfig,
    pub status_message: String,
    /// Position of the focused card among the visible ones.
    pub focus: usize,
}

impl App {
    pub fn new(layout: ModuleLayout, config: ResolvedConfig) -> Self {
        Self {
            layout,
            config,
            status_message: String::from("Welcome to bitbench!"),
            focus: 0,
        }
    }

    /// The card that receives keyboard input, if any card is visible.
    pub fn focused_module(&self) -> Option<ModuleKey> {
        self.layout.visible().get(self.focus).copied()
    }

    /// Keep `focus` inside the visible list after the layout changes.
    pub fn clamp_focus(&mut self) {
        let count = self.layout.visible().len();
        self.focus = self.focus.min(count.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use crate::core::modules::ModuleKey;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to bitbench!");
        assert_eq!(app.focus, 0);
        assert_eq!(app.focused_module(), Some(ModuleKey::Inverter));
    }

    #[test]
    fn test_no_focus_when_everything_hidden() {
        let mut app = test_app();
        for key in ModuleKey::ALL {
            app.layout.set_visible(key, false);
        }
        app.focus = 4;
        app.clamp_focus();
        assert_eq!(app.focus, 0);
        assert_eq!(app.focused_module(), None);
    }
}
