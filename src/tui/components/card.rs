//! # Calculator Cards
//!
//! Every calculator on the board is a [`Calculator`]: a set of input
//! [`Field`]s plus a pure function from those fields to readout lines.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CardState` (calculator + focused field) lives in `TuiState`
//! - `Card` is created each frame with borrowed state and drawn into the
//!   board's `ScrollView`
//!
//! ```text
//! ╭ Base Converter ───────────────────────╮
//! │ ▸ Input         ff                    │
//! │   Input Base    ◀ 16 ▶                │
//! │                                       │
//! │   Binary        11111111              │
//! │   Decimal       255                   │
//! ╰───────────────────────────────────────╯
//! ```

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::core::modules::ModuleKey;
use crate::tui::component::EventHandler;
use crate::tui::components::field::{Field, FieldEvent};
use crate::tui::event::TuiEvent;

/// Placeholder for an output that has no value.
pub const EMPTY: &str = "—";

/// Borders (top + bottom) and the blank line between inputs and readout.
const VERTICAL_OVERHEAD: u16 = 3;

/// One line of a card's output.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadoutLine {
    /// Label / value pair, labels aligned with the input labels.
    Pair(String, String),
    /// Preformatted text (tables, grids).
    Text(String),
    /// Invalid input, shown in red.
    Error(String),
    /// Dim explanatory note.
    Hint(String),
}

impl ReadoutLine {
    pub fn pair(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Pair(label.into(), value.into())
    }

    /// A pair whose missing value renders as the placeholder.
    pub fn maybe(label: impl Into<String>, value: Option<String>) -> Self {
        Self::Pair(label.into(), value.unwrap_or_else(|| EMPTY.to_string()))
    }
}

/// A calculator shown as a card on the board.
pub trait Calculator {
    fn key(&self) -> ModuleKey;
    fn fields(&self) -> &[Field];
    fn fields_mut(&mut self) -> &mut [Field];

    /// Recompute the output from the current field values.
    fn readout(&self) -> Vec<ReadoutLine>;

    /// Called after field `index` changed. Calculators that care which input
    /// was edited last override this.
    fn edited(&mut self, _index: usize) {}
}

/// Emitted when a card's inputs change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEvent {
    Changed(ModuleKey),
}

/// Persistent state for one card.
pub struct CardState {
    pub calculator: Box<dyn Calculator>,
    pub focused_field: usize,
}

impl CardState {
    pub fn new(calculator: Box<dyn Calculator>) -> Self {
        Self {
            calculator,
            focused_field: 0,
        }
    }

    pub fn key(&self) -> ModuleKey {
        self.calculator.key()
    }

    /// Rendered height: one line per field and readout line plus overhead.
    pub fn height(&self) -> u16 {
        let lines = self.calculator.fields().len() + self.calculator.readout().len();
        u16::try_from(lines)
            .unwrap_or(u16::MAX)
            .saturating_add(VERTICAL_OVERHEAD)
    }
}

impl EventHandler for CardState {
    type Event = CardEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let count = self.calculator.fields().len();
        if count == 0 {
            return None;
        }
        match event {
            TuiEvent::CursorUp => {
                self.focused_field = self.focused_field.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown | TuiEvent::Submit => {
                self.focused_field = (self.focused_field + 1).min(count - 1);
                None
            }
            _ => {
                let index = self.focused_field.min(count - 1);
                let field = &mut self.calculator.fields_mut()[index];
                match field.handle_event(event)? {
                    FieldEvent::Changed => {
                        self.calculator.edited(index);
                        Some(CardEvent::Changed(self.calculator.key()))
                    }
                }
            }
        }
    }
}

/// Transient render wrapper for a card.
pub struct Card<'a> {
    pub state: &'a CardState,
    pub focused: bool,
}

impl<'a> Card<'a> {
    pub fn new(state: &'a CardState, focused: bool) -> Self {
        Self { state, focused }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let calculator = &self.state.calculator;
        let readout = calculator.readout();

        let label_width = calculator
            .fields()
            .iter()
            .map(|f| f.label.width())
            .chain(readout.iter().filter_map(|line| match line {
                ReadoutLine::Pair(label, _) => Some(label.width()),
                _ => None,
            }))
            .max()
            .unwrap_or(0);

        let mut lines = Vec::with_capacity(calculator.fields().len() + readout.len() + 1);
        for (i, field) in calculator.fields().iter().enumerate() {
            let is_focused = self.focused && i == self.state.focused_field;
            let (marker, label_style) = if is_focused {
                ("▸ ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            } else {
                ("  ", Style::default().fg(Color::Gray))
            };
            let mut spans = vec![
                Span::styled(marker, label_style),
                Span::styled(pad_label(field.label, label_width), label_style),
            ];
            spans.extend(field.spans(is_focused));
            lines.push(Line::from(spans));
        }

        lines.push(Line::default());

        for line in readout {
            lines.push(match line {
                ReadoutLine::Pair(label, value) => Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        pad_label(&label, label_width),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(value, Style::default().fg(Color::White)),
                ]),
                ReadoutLine::Text(text) => {
                    Line::from(vec![Span::raw("  "), Span::raw(text)])
                }
                ReadoutLine::Error(message) => Line::from(vec![
                    Span::raw("  "),
                    Span::styled(message, Style::default().fg(Color::Red)),
                ]),
                ReadoutLine::Hint(note) => Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        note,
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::ITALIC),
                    ),
                ]),
            });
        }
        lines
    }
}

impl Widget for Card<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(format!(" {} ", self.state.key().title()))
            .title_style(border_style.add_modifier(Modifier::BOLD));

        Paragraph::new(self.lines()).block(block).render(area, buf);
    }
}

/// Pad `label` with spaces to `width` display columns plus a gap.
fn pad_label(label: &str, width: usize) -> String {
    let fill = width.saturating_sub(label.width()) + 2;
    format!("{label}{}", " ".repeat(fill))
}
