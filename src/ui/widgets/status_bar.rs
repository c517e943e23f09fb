//! Status bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::Store;

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        if area.height == 0 {
            return;
        }

        let connection_status = if store.app.connected {
            Span::styled("● Online", Style::default().fg(Color::Green))
        } else {
            Span::styled("○ Offline", Style::default().fg(Color::Red))
        };

        let loading = if store.app.loading {
            Span::styled(
                " Loading... ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::raw("")
        };

        let updated = store
            .markets
            .last_updated
            .map(|t| format!(" | Updated {} UTC ", t.format("%H:%M:%S")))
            .unwrap_or_default();

        let help_hint = Span::styled(" Press ? for help ", Style::default().fg(Color::Gray));

        let left_content = vec![
            Span::styled(
                " FinStock ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            connection_status,
            Span::raw(updated),
            loading,
        ];

        let status_line = Line::from(left_content);

        // Right-align the help hint
        let left_len = status_line.width();
        let right_len = help_hint.width();
        let padding = (area.width as usize).saturating_sub(left_len + right_len);

        let mut full_line = status_line.spans;
        full_line.push(Span::raw(" ".repeat(padding)));
        full_line.push(help_hint);

        let paragraph =
            Paragraph::new(Line::from(full_line)).style(Style::default().bg(Color::DarkGray));

        frame.render_widget(paragraph, area);
    }
}
