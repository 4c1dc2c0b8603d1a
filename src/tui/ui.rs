use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::core::state::App;
use crate::tui::{TuiState, visible_cards};
use crate::tui::component::Component;
use crate::tui::components::{Board, ModuleManager, TitleBar};

const HELP: &str = " Tab/Shift+Tab Card  ↑/↓ Field  ←/→ Option  PgUp/PgDn Scroll  Ctrl+O Modules  Esc Quit ";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    TitleBar::new(app.status_message.clone(), app.focused_module()).render(frame, title_area);

    let visible = visible_cards(&tui.cards, &app.layout);
    if visible.is_empty() {
        draw_empty_board(frame, main_area);
    } else {
        Board::new(&mut tui.board, visible, app.focus).render(frame, main_area);
    }

    frame.render_widget(
        Line::from(HELP).style(Style::default().fg(Color::DarkGray)),
        help_area,
    );

    if let Some(manager) = tui.module_manager.as_mut() {
        ModuleManager::new(manager, &app.layout).render(frame, frame.area());
    }
}

fn draw_empty_board(frame: &mut Frame, area: Rect) {
    let empty = Paragraph::new("All modules are hidden. Press Ctrl+O to choose modules.")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::bordered().border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(empty, area);
}
