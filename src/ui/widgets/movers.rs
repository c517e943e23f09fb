//! Top gainers and losers on the home screen.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::state::{MoverKind, StockQuote, Store};

/// Home screen: two side-by-side mover tables.
pub struct MoversPanel;

impl MoversPanel {
    /// Render both sections, or the error panel if the fetch failed.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let markets = &store.markets;

        if let Some(error) = &markets.error {
            super::render_error_panel(frame, area, " Top Movers ", error);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        for (kind, rows, chunk) in [
            (MoverKind::Gainers, &markets.gainers, chunks[0]),
            (MoverKind::Losers, &markets.losers, chunks[1]),
        ] {
            let focused = markets.focused == kind;
            let selected = focused.then_some(markets.selected_index);
            let title = format!(" Top {kind} ");
            let table = quote_table(rows, &title, focused);

            let mut state = TableState::default();
            state.select(selected.filter(|_| !rows.is_empty()));
            frame.render_stateful_widget(table, chunk, &mut state);

            if markets.loading && rows.is_empty() {
                render_placeholder(frame, chunk, "Loading...");
            } else if !markets.loading && rows.is_empty() {
                render_placeholder(frame, chunk, "No data");
            }
        }
    }
}

/// Build a quote table shared by the home and view-all screens.
pub fn quote_table<'a>(rows: &'a [StockQuote], title: &'a str, focused: bool) -> Table<'a> {
    let header_cells = ["Symbol", "Price", "Change"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    let body = rows.iter().map(|quote| {
        Row::new(vec![
            Cell::from(quote.symbol.as_str()),
            Cell::from(format!("${}", quote.price)),
            Cell::from(quote.change_percentage.as_str()).style(change_style(quote.is_down())),
        ])
    });

    let border = if focused { Color::Cyan } else { Color::DarkGray };

    Table::new(
        body,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    )
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("▶ ")
}

/// Green for gains, red for losses.
pub fn change_style(is_down: bool) -> Style {
    if is_down {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, text: &str) {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    if inner.height < 3 {
        return;
    }
    let line = Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
    ));
    let placeholder = Rect {
        y: inner.y + 2,
        height: 1,
        ..inner
    };
    frame.render_widget(Paragraph::new(line).centered(), placeholder);
}
