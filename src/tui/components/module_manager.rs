//! # Module Manager Component
//!
//! Overlay for choosing which calculator cards appear on the board and in
//! what order. Opened with Ctrl+O, dismissed with Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ModuleManagerState` lives in `TuiState`
//! - `ModuleManager` is created each frame with borrowed state and the
//!   current layout
//!
//! The layout itself belongs to the core `App`; the overlay only emits
//! events that the run loop turns into actions.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::core::modules::{ModuleKey, ModuleLayout};
use crate::tui::event::TuiEvent;

/// Persistent state for the module manager overlay.
pub struct ModuleManagerState {
    /// Row under the cursor, counted among the rows matching `query`.
    pub selected: usize,
    pub query: String,
    /// Keystrokes go to `query` instead of acting on rows.
    pub filtering: bool,
    pub list_state: ListState,
}

impl ModuleManagerState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            query: String::new(),
            filtering: false,
            list_state: ListState::default().with_selected(Some(0)),
        }
    }

    /// Handle a key event against the current layout.
    pub fn handle_event(
        &mut self,
        event: &TuiEvent,
        layout: &ModuleLayout,
    ) -> Option<ModuleManagerEvent> {
        if self.filtering {
            return self.handle_filter_event(event, layout);
        }

        let rows = layout.matching(&self.query);
        match event {
            TuiEvent::Escape => {
                if self.query.is_empty() {
                    Some(ModuleManagerEvent::Dismiss)
                } else {
                    self.query.clear();
                    self.select(0, layout.len());
                    None
                }
            }
            TuiEvent::CursorUp => {
                self.select(self.selected.saturating_sub(1), rows.len());
                None
            }
            TuiEvent::CursorDown => {
                self.select(self.selected + 1, rows.len());
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar(' ') => rows
                .get(self.selected)
                .map(|&idx| ModuleManagerEvent::Toggle(layout.entries()[idx].key)),
            TuiEvent::InputChar('/') => {
                self.filtering = true;
                None
            }
            TuiEvent::InputChar('r') => {
                self.query.clear();
                self.select(0, layout.len());
                Some(ModuleManagerEvent::Reset)
            }
            // Reordering a filtered view would be ambiguous
            TuiEvent::InputChar('u') if self.query.is_empty() => {
                let from = self.selected;
                if from == 0 || from >= layout.len() {
                    return None;
                }
                self.select(from - 1, layout.len());
                Some(ModuleManagerEvent::Move { from, to: from - 1 })
            }
            TuiEvent::InputChar('d') if self.query.is_empty() => {
                let from = self.selected;
                if from + 1 >= layout.len() {
                    return None;
                }
                self.select(from + 1, layout.len());
                Some(ModuleManagerEvent::Move { from, to: from + 1 })
            }
            _ => None,
        }
    }

    fn handle_filter_event(
        &mut self,
        event: &TuiEvent,
        layout: &ModuleLayout,
    ) -> Option<ModuleManagerEvent> {
        match event {
            TuiEvent::InputChar(c) => self.query.push(*c),
            TuiEvent::Paste(text) => self.query.extend(text.chars().filter(|c| !c.is_control())),
            TuiEvent::Backspace => {
                self.query.pop();
            }
            TuiEvent::Submit => self.filtering = false,
            TuiEvent::Escape => {
                self.filtering = false;
                self.query.clear();
            }
            _ => return None,
        }
        self.select(0, layout.matching(&self.query).len());
        None
    }

    fn select(&mut self, row: usize, count: usize) {
        self.selected = row.min(count.saturating_sub(1));
        self.list_state
            .select(if count == 0 { None } else { Some(self.selected) });
    }
}

impl Default for ModuleManagerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Events emitted by the module manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleManagerEvent {
    Toggle(ModuleKey),
    /// Positions in the unfiltered layout.
    Move { from: usize, to: usize },
    Reset,
    Dismiss,
}

/// Transient render wrapper for the module manager overlay.
pub struct ModuleManager<'a> {
    state: &'a mut ModuleManagerState,
    layout: &'a ModuleLayout,
}

impl<'a> ModuleManager<'a> {
    pub fn new(state: &'a mut ModuleManagerState, layout: &'a ModuleLayout) -> Self {
        Self { state, layout }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 70, area);
        frame.render_widget(Clear, overlay);

        let help_text = if self.state.filtering {
            " Type to filter  Enter Done  Esc Clear "
        } else if self.state.query.is_empty() {
            " Space Toggle  u/d Move  / Filter  r Reset  Esc Back "
        } else {
            " Space Toggle  / Filter  Esc Clear filter "
        };
        let title = if self.state.query.is_empty() {
            " Modules ".to_string()
        } else {
            format!(" Modules /{} ", self.state.query)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        let rows = self.layout.matching(&self.state.query);
        if rows.is_empty() {
            let empty = Paragraph::new("No matching modules.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let inner_width = overlay.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = rows
            .iter()
            .enumerate()
            .map(|(i, &idx)| {
                let entry = &self.layout.entries()[idx];
                let (mark, status) = if entry.visible {
                    ("[x] ", "Visible")
                } else {
                    ("[ ] ", "Hidden ")
                };
                let title_width = inner_width.saturating_sub(mark.len() + status.len() + 2);
                let title = format!("{:<title_width$}", entry.key.title());

                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if entry.visible {
                    Style::default().fg(Color::Gray)
                } else {
                    Style::default().fg(Color::DarkGray)
                };

                ListItem::new(Line::from(vec![
                    Span::styled(mark, style),
                    Span::styled(title, style),
                    Span::styled("  ", style),
                    Span::styled(status, style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_keys(state: &mut ModuleManagerState, layout: &ModuleLayout, keys: &str) {
        for c in keys.chars() {
            state.handle_event(&TuiEvent::InputChar(c), layout);
        }
    }

    #[test]
    fn test_toggle_selected_row() {
        let layout = ModuleLayout::default();
        let mut state = ModuleManagerState::new();
        state.handle_event(&TuiEvent::CursorDown, &layout);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar(' '), &layout),
            Some(ModuleManagerEvent::Toggle(ModuleKey::Pow2))
        );
    }

    #[test]
    fn test_selection_is_clamped() {
        let layout = ModuleLayout::default();
        let mut state = ModuleManagerState::new();
        state.handle_event(&TuiEvent::CursorUp, &layout);
        assert_eq!(state.selected, 0);
        for _ in 0..20 {
            state.handle_event(&TuiEvent::CursorDown, &layout);
        }
        assert_eq!(state.selected, layout.len() - 1);
    }

    #[test]
    fn test_move_up_and_down() {
        let layout = ModuleLayout::default();
        let mut state = ModuleManagerState::new();
        assert_eq!(state.handle_event(&TuiEvent::InputChar('u'), &layout), None);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('d'), &layout),
            Some(ModuleManagerEvent::Move { from: 0, to: 1 })
        );
        assert_eq!(state.selected, 1);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('u'), &layout),
            Some(ModuleManagerEvent::Move { from: 1, to: 0 })
        );
    }

    #[test]
    fn test_filter_narrows_rows() {
        let layout = ModuleLayout::default();
        let mut state = ModuleManagerState::new();
        type_keys(&mut state, &layout, "/conv");
        assert!(state.filtering);
        state.handle_event(&TuiEvent::Submit, &layout);
        assert!(!state.filtering);

        // "Base Converter" then "Size Converter"
        state.handle_event(&TuiEvent::CursorDown, &layout);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit, &layout),
            Some(ModuleManagerEvent::Toggle(ModuleKey::Size))
        );
        // No reordering while filtered
        assert_eq!(state.handle_event(&TuiEvent::InputChar('u'), &layout), None);

        // First Esc clears the filter, the second dismisses
        assert_eq!(state.handle_event(&TuiEvent::Escape, &layout), None);
        assert!(state.query.is_empty());
        assert_eq!(
            state.handle_event(&TuiEvent::Escape, &layout),
            Some(ModuleManagerEvent::Dismiss)
        );
    }

    #[test]
    fn test_render_lists_modules() {
        let mut layout = ModuleLayout::default();
        layout.set_visible(ModuleKey::Pow2, false);
        let mut state = ModuleManagerState::new();

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| ModuleManager::new(&mut state, &layout).render(f, f.area()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Modules"));
        assert!(text.contains("[x] Bit Inverter"));
        assert!(text.contains("[ ] 2^n Calculator"));
        assert!(text.contains("Hidden"));
    }

    #[test]
    fn test_render_empty_filter() {
        let layout = ModuleLayout::default();
        let mut state = ModuleManagerState::new();
        type_keys(&mut state, &layout, "/zzz");

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| ModuleManager::new(&mut state, &layout).render(f, f.area()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("No matching modules."));
    }
}
