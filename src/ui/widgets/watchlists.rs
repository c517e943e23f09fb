//! Watchlist screens and the add-to-watchlist picker.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState},
};

use super::movers::change_style;
use crate::state::Store;
use crate::ui::layout::centered_rect;

/// All watchlists with their stock counts.
pub struct WatchlistsView;

impl WatchlistsView {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let lists = &store.watchlists.lists;
        let block = Block::default()
            .title(format!(" Watchlists ({}) ", lists.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        if lists.is_empty() {
            let hint = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No watchlists yet. Press n to create one.",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .centered()
            .block(block);
            frame.render_widget(hint, area);
            return;
        }

        let items: Vec<ListItem> = lists
            .iter()
            .map(|w| {
                ListItem::new(Line::from(vec![
                    Span::styled(w.name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(
                        format!("  {} stocks", w.stocks.len()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("▶ ");

        let mut state = ListState::default();
        state.select(Some(store.watchlists.selected_index));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Stocks inside the open watchlist.
pub struct WatchlistDetailView;

impl WatchlistDetailView {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let Some(watchlist) = store.watchlists.opened() else {
            return;
        };

        let header = Row::new(["Symbol", "Name", "Price", "Change"].map(|h| {
            Cell::from(h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        }))
        .bottom_margin(1);

        let rows = watchlist.stocks.iter().map(|s| {
            Row::new(vec![
                Cell::from(s.symbol.as_str()),
                Cell::from(s.name.as_str()),
                Cell::from(if s.price.is_empty() {
                    "-".to_string()
                } else {
                    format!("${}", s.price)
                }),
                Cell::from(s.change_percentage.as_str())
                    .style(change_style(s.change_percentage.starts_with('-'))),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Percentage(50),
                Constraint::Length(12),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(format!(" {} ({}) ", watchlist.name, watchlist.stocks.len()))
                .title_bottom(" x: remove  Enter: details  Esc: back ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select((!watchlist.stocks.is_empty()).then_some(store.watchlists.selected_stock));
        frame.render_stateful_widget(table, area, &mut state);
    }
}

/// Popup listing watchlists; a check marks the ones holding the current stock.
pub struct WatchlistPicker;

impl WatchlistPicker {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let popup = centered_rect(50, 50, area);
        frame.render_widget(Clear, popup);

        let symbol = store.details.symbol.as_deref().unwrap_or_default();
        let block = Block::default()
            .title(format!(" Save {symbol} to... "))
            .title_bottom(" Enter: toggle  n: new  Esc: close ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));

        let lists = &store.watchlists.lists;
        if lists.is_empty() {
            let hint = Paragraph::new("No watchlists yet. Press n to create one.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(hint, popup);
            return;
        }

        let items: Vec<ListItem> = lists
            .iter()
            .map(|w| {
                let mark = if w.contains(symbol) { "[x] " } else { "[ ] " };
                ListItem::new(format!("{mark}{}", w.name))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = ListState::default();
        state.select(Some(store.app.picker_index));
        frame.render_stateful_widget(list, popup, &mut state);
    }
}
