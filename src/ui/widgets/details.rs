//! Company details screen.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table, Tabs, Wrap,
    },
};

use super::movers::change_style;
use crate::state::{CompanyDetails, DetailsState, Store, TimeRange};

/// Header, price chart with range selector, and fundamentals.
pub struct DetailsView;

impl DetailsView {
    /// Render the details screen.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let details = &store.details;

        let Some(company) = &details.company else {
            match &details.error {
                Some(error) => super::render_error_panel(frame, area, " Details ", error),
                None => render_loading(frame, area, details),
            }
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Name + price
                Constraint::Length(1), // Range selector
                Constraint::Min(8),    // Chart
                Constraint::Length(9), // About
            ])
            .split(area);

        let saved = store.watchlists.contains_symbol(&company.overview.symbol);
        render_header(frame, chunks[0], company, details, saved);
        render_ranges(frame, chunks[1], details.selected_range);
        render_chart(frame, chunks[2], details);
        render_about(frame, chunks[3], company);
    }
}

fn render_loading(frame: &mut Frame, area: Rect, details: &DetailsState) {
    let symbol = details.symbol.as_deref().unwrap_or("");
    let text = Line::from(Span::styled(
        format!("Loading {symbol}..."),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
    ));
    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_header(
    frame: &mut Frame,
    area: Rect,
    company: &CompanyDetails,
    details: &DetailsState,
    saved: bool,
) {
    let overview = &company.overview;
    let name = overview.name.as_deref().unwrap_or(&overview.symbol);

    let mut spans = vec![
        Span::styled(
            if saved { "★ " } else { "☆ " },
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("{} ", overview.symbol),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("{name}  ")),
    ];

    match (&company.price, &company.change_percent) {
        (Some(price), change) => {
            spans.push(Span::styled(
                format!("${price} "),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            if let Some(change) = change {
                spans.push(Span::styled(change.clone(), change_style(change.starts_with('-'))));
            }
        }
        (None, _) => spans.push(Span::styled(
            "price unavailable",
            Style::default().fg(Color::DarkGray),
        )),
    }

    if let Some(exchange) = &overview.exchange {
        spans.push(Span::styled(
            format!("  {exchange}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if details.loading {
        spans.push(Span::styled("  refreshing...", Style::default().fg(Color::Yellow)));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(header, area);
}

fn render_ranges(frame: &mut Frame, area: Rect, selected: TimeRange) {
    let titles = TimeRange::ALL.iter().map(|r| r.label());
    let selected_index = TimeRange::ALL
        .iter()
        .position(|r| *r == selected)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected_index)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .divider(" ");
    frame.render_widget(tabs, area);
}

fn render_chart(frame: &mut Frame, area: Rect, details: &DetailsState) {
    let block = Block::default()
        .title(format!(" Price ({}) ", details.selected_range.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some((low, high)) = details.chart_bounds() else {
        let message = if details.chart_loading {
            "Loading chart..."
        } else if let Some(error) = &details.error {
            error.as_str()
        } else {
            "No price history"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(Color::Yellow))).block(block),
            area,
        );
        return;
    };

    let points: Vec<(f64, f64)> = details
        .chart
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();

    let first = &details.chart[0];
    let last = &details.chart[details.chart.len() - 1];
    let color = if last.value < first.value {
        Color::Red
    } else {
        Color::Green
    };

    // Keep a flat series visible
    let pad = ((high - low) * 0.05).max(0.01);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, (points.len().saturating_sub(1)).max(1) as f64])
                .labels(vec![
                    Span::raw(first.date.format("%b %d").to_string()),
                    Span::raw(last.date.format("%b %d").to_string()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([low - pad, high + pad])
                .labels(vec![
                    Span::raw(format!("{low:.2}")),
                    Span::raw(format!("{high:.2}")),
                ]),
        );

    frame.render_widget(chart, area);
}

fn render_about(frame: &mut Frame, area: Rect, company: &CompanyDetails) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let rows = company.fundamentals().into_iter().map(|(label, value)| {
        Row::new(vec![
            Cell::from(label).style(Style::default().fg(Color::Yellow)),
            Cell::from(value),
        ])
    });
    let table = Table::new(rows, [Constraint::Length(15), Constraint::Min(0)]).block(
        Block::default()
            .title(" Fundamentals ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(table, chunks[0]);

    let overview = &company.overview;
    let mut lines = Vec::new();
    if let Some(sector) = overview.sector.as_deref().or(overview.asset_type.as_deref()) {
        lines.push(Line::from(Span::styled(
            sector.to_string(),
            Style::default().fg(Color::Cyan),
        )));
    }
    lines.push(Line::from(
        overview
            .description
            .as_deref()
            .unwrap_or("No description available."),
    ));

    let about = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" About ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(about, chunks[1]);
}
