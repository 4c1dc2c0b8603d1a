//! # Field Component
//!
//! A single labelled input on a calculator card: either a one-line text
//! buffer with a cursor, or a choice among fixed options cycled with
//! Left/Right.
//!
//! Fields only know how to edit themselves. The owning card decides which
//! field is focused and recomputes its readout when a field reports
//! `FieldEvent::Changed`.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    Changed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// `cursor` is a byte offset on a char boundary.
    Text { buffer: String, cursor: usize },
    Choice { options: &'static [&'static str], selected: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub fn text(label: &'static str, initial: &str) -> Self {
        Self {
            label,
            kind: FieldKind::Text {
                buffer: initial.to_string(),
                cursor: initial.len(),
            },
        }
    }

    pub fn choice(label: &'static str, options: &'static [&'static str], selected: usize) -> Self {
        Self {
            label,
            kind: FieldKind::Choice {
                options,
                selected: selected.min(options.len().saturating_sub(1)),
            },
        }
    }

    /// The text buffer, or the label of the selected option.
    pub fn value(&self) -> &str {
        match &self.kind {
            FieldKind::Text { buffer, .. } => buffer,
            FieldKind::Choice { options, selected } => options.get(*selected).copied().unwrap_or(""),
        }
    }

    pub fn selected(&self) -> usize {
        match self.kind {
            FieldKind::Choice { selected, .. } => selected,
            FieldKind::Text { .. } => 0,
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, FieldKind::Choice { .. })
    }

    pub fn set_text(&mut self, text: &str) {
        if let FieldKind::Text { buffer, cursor } = &mut self.kind {
            *buffer = text.to_string();
            *cursor = buffer.len();
        }
    }

    /// Spans for the value part of the field. When `focused`, a text field
    /// shows its cursor as a reversed cell and a choice shows its arrows.
    pub fn spans(&self, focused: bool) -> Vec<Span<'static>> {
        let value_style = Style::default().fg(Color::Green);
        match &self.kind {
            FieldKind::Text { buffer, cursor } => {
                if !focused {
                    return vec![Span::styled(buffer.clone(), value_style)];
                }
                let (before, rest) = buffer.split_at(*cursor);
                let mut chars = rest.chars();
                let at = chars.next().map(String::from).unwrap_or_else(|| " ".to_string());
                vec![
                    Span::styled(before.to_string(), value_style),
                    Span::styled(at, value_style.add_modifier(Modifier::REVERSED)),
                    Span::styled(chars.as_str().to_string(), value_style),
                ]
            }
            FieldKind::Choice { .. } => {
                let arrow = if focused {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                vec![
                    Span::styled("◀ ", arrow),
                    Span::styled(self.value().to_string(), value_style),
                    Span::styled(" ▶", arrow),
                ]
            }
        }
    }
}

impl EventHandler for Field {
    type Event = FieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match &mut self.kind {
            FieldKind::Choice { options, selected } => {
                let count = options.len();
                if count == 0 {
                    return None;
                }
                match event {
                    TuiEvent::CursorRight | TuiEvent::InputChar(' ') => {
                        *selected = (*selected + 1) % count;
                        Some(FieldEvent::Changed)
                    }
                    TuiEvent::CursorLeft => {
                        *selected = (*selected + count - 1) % count;
                        Some(FieldEvent::Changed)
                    }
                    _ => None,
                }
            }
            FieldKind::Text { buffer, cursor } => match event {
                TuiEvent::InputChar(c) => {
                    buffer.insert(*cursor, *c);
                    *cursor += c.len_utf8();
                    Some(FieldEvent::Changed)
                }
                TuiEvent::Paste(text) => {
                    let line: String = text.chars().filter(|c| !c.is_control()).collect();
                    buffer.insert_str(*cursor, &line);
                    *cursor += line.len();
                    Some(FieldEvent::Changed)
                }
                TuiEvent::Backspace => {
                    if *cursor == 0 {
                        return None;
                    }
                    let prev = prev_char_boundary(buffer, *cursor);
                    buffer.drain(prev..*cursor);
                    *cursor = prev;
                    Some(FieldEvent::Changed)
                }
                TuiEvent::Delete => {
                    if *cursor >= buffer.len() {
                        return None;
                    }
                    let next = next_char_boundary(buffer, *cursor);
                    buffer.drain(*cursor..next);
                    Some(FieldEvent::Changed)
                }
                // Cursor moves don't change the value; no recompute needed
                TuiEvent::CursorLeft => {
                    *cursor = prev_char_boundary(buffer, *cursor);
                    None
                }
                TuiEvent::CursorRight => {
                    *cursor = next_char_boundary(buffer, *cursor);
                    None
                }
                TuiEvent::Home => {
                    *cursor = 0;
                    None
                }
                TuiEvent::End => {
                    *cursor = buffer.len();
                    None
                }
                _ => None,
            },
        }
    }
}

/// Byte offset of the character boundary before `pos`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the character boundary after `pos`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASES: &[&str] = &["2", "8", "10", "16"];

    #[test]
    fn test_typing_and_backspace() {
        let mut field = Field::text("Input", "");
        assert_eq!(field.handle_event(&TuiEvent::InputChar('f')), Some(FieldEvent::Changed));
        field.handle_event(&TuiEvent::InputChar('f'));
        assert_eq!(field.value(), "ff");
        field.handle_event(&TuiEvent::Backspace);
        assert_eq!(field.value(), "f");
    }

    #[test]
    fn test_cursor_editing_multibyte() {
        let mut field = Field::text("Expr", "A∧B");
        field.handle_event(&TuiEvent::CursorLeft);
        field.handle_event(&TuiEvent::Backspace);
        assert_eq!(field.value(), "AB");
        field.handle_event(&TuiEvent::InputChar('|'));
        assert_eq!(field.value(), "A|B");
        field.handle_event(&TuiEvent::Home);
        field.handle_event(&TuiEvent::Delete);
        assert_eq!(field.value(), "|B");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut field = Field::text("Input", "");
        assert_eq!(field.handle_event(&TuiEvent::Backspace), None);
        assert_eq!(field.handle_event(&TuiEvent::Delete), None);
    }

    #[test]
    fn test_paste_drops_newlines() {
        let mut field = Field::text("Input", "");
        field.handle_event(&TuiEvent::Paste("10\n11\r\n".to_string()));
        assert_eq!(field.value(), "1011");
    }

    #[test]
    fn test_choice_cycles_both_ways() {
        let mut field = Field::choice("Base", BASES, 0);
        field.handle_event(&TuiEvent::CursorLeft);
        assert_eq!(field.value(), "16");
        field.handle_event(&TuiEvent::CursorRight);
        field.handle_event(&TuiEvent::InputChar(' '));
        assert_eq!(field.value(), "8");
        assert_eq!(field.selected(), 1);
        assert_eq!(field.handle_event(&TuiEvent::InputChar('x')), None);
    }

    #[test]
    fn test_choice_selection_is_clamped() {
        let field = Field::choice("Base", BASES, 99);
        assert_eq!(field.value(), "16");
    }

    #[test]
    fn test_focused_text_spans_show_cursor() {
        let field = Field::text("Input", "ab");
        let spans = field.spans(true);
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "ab ");
        assert!(spans[1].style.add_modifier.contains(Modifier::REVERSED));
    }
}
