//! Detail overlay rendering.
//!
//! Displays a modal overlay with the full text of the selected message.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::messages::display_time;

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 12;

/// Render the message detail as a modal overlay.
///
/// Shows the selected message's metadata, then its content wrapped to the
/// overlay width.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(message) = app.selected_message() else {
        return;
    };

    // Width: 80% of screen, clamped to [MIN_OVERLAY_WIDTH, 100]
    let overlay_width = percent_of_len(area.width, 80).clamp(MIN_OVERLAY_WIDTH, 100);
    // Height: 80% of screen, clamped to [MIN_OVERLAY_HEIGHT, 40]
    let overlay_height = percent_of_len(area.height, 80).clamp(MIN_OVERLAY_HEIGHT, 40);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Length(6), // Metadata
        Constraint::Min(4),    // Content
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    // ===== METADATA =====
    let label = Style::default().add_modifier(Modifier::BOLD);
    let header_lines = vec![
        Line::from(vec![Span::styled(" Id: ", label), Span::raw(message.id.to_string())]),
        Line::from(vec![Span::styled(" Time: ", label), Span::raw(display_time(message))]),
        Line::from(vec![
            Span::styled(" Sentiment: ", label),
            Span::styled(
                message.sentiment.clone(),
                app.theme.sentiment_style(&message.sentiment),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Thread: ", label),
            Span::styled(
                message.thread_url.clone(),
                Style::default()
                    .fg(app.theme.highlight)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]),
    ];

    let header_block = Block::default()
        .title(" Message Detail ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));
    frame.render_widget(Paragraph::new(header_lines).block(header_block), chunks[0]);

    // ===== CONTENT =====
    let content_block = Block::default()
        .title(" Message ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let content = Paragraph::new(message.content.as_str())
        .wrap(Wrap { trim: false })
        .block(content_block);
    frame.render_widget(content, chunks[1]);

    // ===== FOOTER =====
    let hint = if app.selected_thread_url().is_some() {
        " o: open thread  ↑↓: next/prev  Esc: close "
    } else {
        " ↑↓: next/prev  Esc: close "
    };
    let footer = Paragraph::new(Line::from(vec![Span::styled(
        hint,
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[2]);
}

/// `percent`% of a terminal length, computed without `u16` overflow.
fn percent_of_len(len: u16, percent: u32) -> u16 {
    (u32::from(len) * percent / 100) as u16
}
