//! Paginated list of every gainer or loser.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, TableState},
};

use super::movers::quote_table;
use crate::state::Store;

pub struct ViewAllList;

impl ViewAllList {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let view = &store.view_all;

        if let Some(error) = &view.error {
            super::render_error_panel(frame, area, " All Movers ", error);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let title = format!(" All {} ({}/{}) ", view.kind, view.displayed.len(), view.all.len());
        let table = quote_table(&view.displayed, &title, true);

        let mut state = TableState::default();
        state.select((!view.displayed.is_empty()).then_some(view.selected_index));
        frame.render_stateful_widget(table, chunks[0], &mut state);

        let footer = if view.loading {
            Span::styled(" Loading...", Style::default().fg(Color::Yellow))
        } else if view.has_more() {
            Span::styled(
                " m / scroll past the end: load more",
                Style::default().fg(Color::DarkGray),
            )
        } else {
            Span::styled(" End of list", Style::default().fg(Color::DarkGray))
        };
        frame.render_widget(Paragraph::new(Line::from(footer)), chunks[1]);
    }
}
