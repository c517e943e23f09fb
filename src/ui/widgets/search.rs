//! Symbol search box, results dropdown and the text input popup.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::state::{InputMode, Store};
use crate::ui::layout::centered_fixed;

/// Max rows shown in the dropdown.
const DROPDOWN_ROWS: u16 = 8;

pub struct SearchBar;

impl SearchBar {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let active = store.app.input_mode == InputMode::Search;
        let search = &store.search;

        let content = if search.query.is_empty() && !active {
            Line::from(Span::styled(
                "Press / to search symbols",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            let mut spans = vec![Span::raw(search.query.as_str())];
            if search.loading {
                spans.push(Span::styled("  searching...", Style::default().fg(Color::Yellow)));
            }
            Line::from(spans)
        };

        let border = if active { Color::Yellow } else { Color::DarkGray };
        let paragraph = Paragraph::new(content).block(
            Block::default()
                .title(" Search ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(paragraph, area);

        if active {
            let x = area.x + 1 + search.query.chars().count() as u16;
            frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }

    /// Render matches below the search box.
    pub fn render_dropdown(frame: &mut Frame, search_area: Rect, frame_area: Rect, store: &Store) {
        let search = &store.search;
        if store.app.input_mode != InputMode::Search || !search.show_dropdown() {
            return;
        }

        let below = frame_area.bottom().saturating_sub(search_area.bottom());
        let height = (search.matches.len() as u16 + 2).min(DROPDOWN_ROWS + 2).min(below);
        if height < 3 {
            return;
        }
        let area = Rect {
            x: search_area.x,
            y: search_area.bottom(),
            width: search_area.width,
            height,
        };
        frame.render_widget(Clear, area);

        let items: Vec<ListItem> = search
            .matches
            .iter()
            .map(|m| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<10}", m.symbol),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(m.name.as_str()),
                    Span::styled(
                        format!("  {} · {}", m.region, m.currency),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = ListState::default();
        state.select(Some(search.selected_index));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Popup for naming a new watchlist.
pub fn render_input_popup(frame: &mut Frame, area: Rect, store: &Store) {
    let popup = centered_fixed(50, 3, area);
    frame.render_widget(Clear, popup);

    let paragraph = Paragraph::new(store.app.input_buffer.as_str()).block(
        Block::default()
            .title(" New watchlist name ")
            .title_bottom(" Enter: create  Esc: cancel ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(paragraph, popup);

    let x = popup.x + 1 + store.app.cursor_position as u16;
    frame.set_cursor_position(Position::new(x.min(popup.right().saturating_sub(2)), popup.y + 1));
}
