//! # TitleBar Component
//!
//! Top status bar: application name, status message and the focused card.
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.status_message.clone(), Some(ModuleKey::Base));
//! title_bar.render(frame, area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Focused card**: `"bitbench | Layout reset | Base Converter"`
//! 2. **Status only**: `"bitbench | Layout reset"`
//! 3. **Default**: `"bitbench"`

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::modules::ModuleKey;
use crate::tui::component::Component;

pub struct TitleBar {
    pub status_message: String,
    pub focused: Option<ModuleKey>,
}

impl TitleBar {
    pub fn new(status_message: String, focused: Option<ModuleKey>) -> Self {
        Self {
            status_message,
            focused,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            "bitbench",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }
        if let Some(key) = self.focused {
            spans.push(Span::styled(
                format!(" | {}", key.title()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
