//! Tab bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{Store, View};

/// Tab bar widget.
pub struct TabBar;

impl TabBar {
    /// Render the tab bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let tabs = [("1", "Home", View::Home), ("2", "Watchlists", View::Watchlists)];
        let active = store.app.current_view.tab();

        let mut spans = vec![Span::raw(" ")];

        for (key, name, view) in tabs {
            let name_style = if active == view {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::White)
            };

            spans.push(Span::styled(format!("[{key}] "), Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(name, name_style));
            spans.push(Span::raw("  "));
        }

        // Breadcrumb for pushed screens
        let crumb = match store.app.current_view {
            View::ViewAll => Some(format!("› {}", store.view_all.kind)),
            View::Details => store.details.symbol.as_ref().map(|s| format!("› {s}")),
            View::WatchlistDetail => store.watchlists.open.as_ref().map(|n| format!("› {n}")),
            View::Home | View::Watchlists => None,
        };
        if let Some(crumb) = crumb {
            spans.push(Span::styled(crumb, Style::default().fg(Color::Yellow)));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
