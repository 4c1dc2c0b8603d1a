//! # Board Component
//!
//! Vertical, scrollable stack of the visible calculator cards.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `BoardState` (scroll offset, cached card heights) lives in `TuiState`
//! - `Board` is created each frame from the visible cards and the focus
//!
//! Moving focus asks the board to bring the focused card into view on the
//! next frame. Manual scrolling cancels that until focus moves again.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::tui::component::EventHandler;
use crate::tui::components::card::{Card, CardState};
use crate::tui::event::TuiEvent;

pub struct BoardState {
    pub scroll_state: ScrollViewState,
    /// Card heights from the last frame, in board order.
    pub heights: Vec<u16>,
    pub viewport_height: u16,
    /// Scroll the focused card into view on the next render.
    pub follow_focus: bool,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            heights: Vec::new(),
            viewport_height: 0,
            follow_focus: true,
        }
    }

    fn total_height(&self) -> u16 {
        stacked_height(&self.heights)
    }

    /// Clamp the scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.total_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Scroll so card `idx` is fully visible. A card taller than the
    /// viewport is aligned to its top edge.
    pub fn scroll_to(&mut self, idx: usize) {
        if idx >= self.heights.len() {
            return;
        }
        let top = stacked_height(&self.heights[..idx]);
        let bottom = top.saturating_add(self.heights[idx]);
        let offset_y = self.scroll_state.offset().y;

        if top < offset_y || self.heights[idx] > self.viewport_height {
            self.scroll_state.set_offset(Position { x: 0, y: top });
        } else if bottom > offset_y.saturating_add(self.viewport_height) {
            self.scroll_state.set_offset(Position {
                x: 0,
                y: bottom.saturating_sub(self.viewport_height),
            });
        }
    }
}

/// Height of cards stacked on top of each other, saturating at `u16::MAX`.
fn stacked_height(heights: &[u16]) -> u16 {
    heights.iter().fold(0, |total, h| total.saturating_add(*h))
}

impl EventHandler for BoardState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        self.follow_focus = false;
        self.clamp_scroll();
        None
    }
}

/// Transient render wrapper for the board.
pub struct Board<'a> {
    state: &'a mut BoardState,
    cards: Vec<&'a CardState>,
    focus: usize,
}

impl<'a> Board<'a> {
    pub fn new(state: &'a mut BoardState, cards: Vec<&'a CardState>, focus: usize) -> Self {
        Self {
            state,
            cards,
            focus,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        // Leave a column for the scrollbar
        let content_width = area.width.saturating_sub(1);

        self.state.heights = self.cards.iter().map(|card| card.height()).collect();
        self.state.viewport_height = area.height;
        if self.state.follow_focus {
            self.state.scroll_to(self.focus);
            self.state.follow_focus = false;
        }
        self.state.clamp_scroll();

        let total_height = self.state.total_height();
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (i, (card, height)) in self.cards.iter().zip(&self.state.heights).enumerate() {
            let rect = Rect::new(0, y_offset, content_width, *height);
            scroll_view.render_widget(Card::new(card, i == self.focus), rect);
            y_offset = y_offset.saturating_add(*height);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
