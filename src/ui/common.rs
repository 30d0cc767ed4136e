//! Common UI components shared across views.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_elapsed;

/// Render the header bar.
///
/// Displays: title, data source, total messages and message rate.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            " SENTIMENT DASHBOARD ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(
            app.source_description().to_string(),
            Style::default().fg(app.theme.muted),
        ),
    ];

    if app.dashboard.is_empty() {
        spans.push(Span::raw(" │ Loading..."));
    } else {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            app.dashboard.summary.total_messages.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" messages"));
        if let Some(rate) = app.dashboard.history.rate() {
            spans.push(Span::raw(format!(" │ {:+.1}/s", rate)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Key hints for the current overlay state.
fn controls(app: &App) -> &'static str {
    if app.show_detail_overlay {
        "o:open link Esc:back ?:help q:quit"
    } else {
        "↑↓:select Enter:detail o:open r:refresh e:export ?:help q:quit"
    }
}

/// Render the status bar at the bottom.
///
/// Shows time since last update and available controls.
/// Temporary status messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = match app.dashboard.latest_update() {
        Some(at) => format!(
            " Updated {} ago | {}",
            format_elapsed(at.elapsed()),
            controls(app)
        ),
        None => " Waiting for data... | r:refresh q:quit".to_string(),
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = Style::default().add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(" Messages", section)]),
        Line::from("  ↑/↓ j/k     Select message"),
        Line::from("  PgUp/PgDn   Jump 10 messages"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       View detail"),
        Line::from("  o           Open thread link"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        Line::from(vec![Span::styled(" General", section)]),
        Line::from("  r           Refresh now"),
        Line::from("  e           Export to JSON"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 19u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
