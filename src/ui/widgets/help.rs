//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::config::KeyBindings;
use crate::ui::layout::centered_rect;

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel from the configured bindings.
    pub fn render(frame: &mut Frame, area: Rect, keys: &KeyBindings) {
        let popup_area = centered_rect(60, 80, area);
        frame.render_widget(Clear, popup_area);

        let sections: [(&str, Vec<(String, &str)>); 4] = [
            (
                "Navigation",
                vec![
                    (format!("{}/↓", keys.down), "Move down"),
                    (format!("{}/↑", keys.up), "Move up"),
                    (keys.select.clone(), "Open / confirm"),
                    (keys.back.clone(), "Back"),
                    (keys.home.clone(), "Home"),
                    (keys.watchlists.clone(), "Watchlists"),
                ],
            ),
            (
                "Home",
                vec![
                    (keys.switch_section.clone(), "Switch gainers / losers"),
                    (keys.view_all.clone(), "View all"),
                    (keys.load_more.clone(), "Load more (view all)"),
                    (keys.search.clone(), "Search symbols"),
                ],
            ),
            (
                "Details",
                vec![
                    (
                        format!("{} {}", keys.prev_range, keys.next_range),
                        "Previous / next chart range",
                    ),
                    (keys.add_to_watchlist.clone(), "Save to watchlist"),
                ],
            ),
            (
                "General",
                vec![
                    (keys.new_watchlist.clone(), "New watchlist"),
                    (keys.delete.clone(), "Delete watchlist / remove stock"),
                    (keys.refresh.clone(), "Refresh / retry"),
                    (keys.help.clone(), "Toggle help"),
                    (keys.quit.clone(), "Quit"),
                ],
            ),
        ];

        let mut help_text = Vec::new();
        for (title, entries) in sections {
            help_text.push(Line::from(Span::styled(
                title,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            for (key, description) in entries {
                help_text.push(Line::from(vec![
                    Span::styled(format!("  {key:<7}"), Style::default().fg(Color::Cyan)),
                    Span::raw(description),
                ]));
            }
            help_text.push(Line::from(""));
        }

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        frame.render_widget(help, popup_area);
    }
}
