//! Summary tiles: total messages and the three sentiment percentages.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{SentimentLabel, SentimentSummary};

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the row of four summary tiles.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::horizontal([Constraint::Fill(1); 4]).split(area);
    let summary = &app.dashboard.summary;

    let trend = trend_line(app);
    render_tile(
        frame,
        app,
        chunks[0],
        "Total Messages",
        summary.total_messages.to_string(),
        app.theme.highlight,
        trend,
    );

    for (chunk, label) in chunks[1..].iter().zip(SentimentLabel::ALL) {
        render_tile(
            frame,
            app,
            *chunk,
            &format!("{} (%)", label.as_str()),
            format!("{}%", percent_field(summary, label)),
            app.theme.sentiment_color(label),
            None,
        );
    }
}

/// The pre-formatted percentage for a label, or `0` if it is blank.
pub fn percent_field(summary: &SentimentSummary, label: SentimentLabel) -> &str {
    let value = match label {
        SentimentLabel::Positive => &summary.positive,
        SentimentLabel::Negative => &summary.negative,
        SentimentLabel::Neutral => &summary.neutral,
    };
    if value.is_empty() {
        "0"
    } else {
        value
    }
}

fn render_tile(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    value: String,
    color: Color,
    footer: Option<Line<'static>>,
) {
    let block = Block::default()
        .title(Line::from(format!(" {} ", title)).alignment(Alignment::Center))
        .title_style(app.theme.header)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let mut lines = vec![Line::from(Span::styled(
        value,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];
    if let Some(footer) = footer {
        lines.push(footer);
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Message-rate sparkline and per-second rate for the total tile.
fn trend_line(app: &App) -> Option<Line<'static>> {
    let history = &app.dashboard.history;
    let sparkline = render_sparkline(&history.sparkline());
    let rate = history.rate()?;

    Some(Line::from(vec![
        Span::styled(sparkline, Style::default().fg(app.theme.muted)),
        Span::raw(format!(" {:+.1}/s", rate)),
    ]))
}

/// Render sparkline levels (0-7) as bar characters.
fn render_sparkline(levels: &[u8]) -> String {
    levels
        .iter()
        .map(|&v| SPARKLINE_CHARS[(v as usize).min(7)])
        .collect()
}
