//! Recent messages feed.
//!
//! Each message is a small card: time, content, thread link and sentiment.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::timestamp::format_local;
use crate::data::Message;
use crate::ui::theme::Theme;

/// Shown when the feed is empty.
pub const EMPTY_TEXT: &str = "No messages to display.";

/// Render the message feed.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let messages = &app.dashboard.messages;
    let title = if messages.is_empty() {
        " Recent Messages ".to_string()
    } else {
        format!(" Recent Messages ({}) ", messages.len())
    };

    let block = Block::default()
        .title(title)
        .title_style(app.theme.header)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if messages.is_empty() {
        frame.render_widget(Paragraph::new(EMPTY_TEXT).block(block), area);
        return;
    }

    // Leave room for the borders and the "│ " gutter.
    let content_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = messages
        .iter()
        .map(|m| ListItem::new(card_lines(m, &app.theme, content_width)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(app.theme.selected)
        .highlight_symbol("▌");

    let mut state = ListState::default();
    state.select(Some(app.selected_message_index));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Post time of a message in local time, or a dash if unknown.
pub fn display_time(message: &Message) -> String {
    message
        .latest_post_time
        .as_ref()
        .map(format_local)
        .unwrap_or_else(|| "-".to_string())
}

fn card_lines(message: &Message, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let label = Style::default().add_modifier(Modifier::BOLD);
    vec![
        Line::from(vec![
            Span::styled("Time: ", label),
            Span::styled(display_time(message), Style::default().fg(theme.muted)),
        ]),
        Line::from(vec![
            Span::styled("Message: ", label),
            Span::raw(truncate(&single_line(&message.content), width.saturating_sub(9))),
        ]),
        Line::from(vec![
            Span::styled("Thread: ", label),
            Span::styled(
                truncate(&message.thread_url, width.saturating_sub(8)),
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]),
        Line::from(vec![
            Span::styled("Sentiment: ", label),
            Span::styled(message.sentiment.clone(), theme.sentiment_style(&message.sentiment)),
        ]),
        Line::from(""),
    ]
}

/// Collapse line breaks so a card line stays on one row.
fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `s` to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('…');
    out
}
