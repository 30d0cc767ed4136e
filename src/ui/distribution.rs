//! Sentiment distribution chart.
//!
//! Terminal stand-in for a pie chart: one horizontal bar per slice plus a
//! proportional share strip, in the slices' fixed order.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::summary::percent_of;
use crate::data::SentimentSlice;

/// Placeholder shown until the first summary arrives.
pub const LOADING_TEXT: &str = "Loading sentiment data...";

/// Render the distribution panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Sentiment Distribution ")
        .title_style(app.theme.header)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let slices = &app.dashboard.slices;
    if slices.is_empty() {
        frame.render_widget(Paragraph::new(LOADING_TEXT).block(block), area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(inner);

    let total: u64 = slices.iter().map(|s| s.value).sum();
    let bars: Vec<Bar> = slices
        .iter()
        .map(|slice| {
            let color = app.theme.sentiment_color(slice.label);
            Bar::default()
                .value(slice.value)
                .label(Line::from(slice.label.as_str()))
                .text_value(format!("{} ({:.1}%)", slice.value, share(slice, total)))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(color).add_modifier(Modifier::REVERSED))
        })
        .collect();

    let chart = BarChart::default()
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, chunks[0]);

    frame.render_widget(
        Paragraph::new(share_strip(app, slices, chunks[1].width)),
        chunks[1],
    );
}

/// Share of all messages held by a slice, in percent.
fn share(slice: &SentimentSlice, total: u64) -> f64 {
    percent_of(slice.value, total).unwrap_or(0.0)
}

/// Split `width` cells between slices proportionally to their values.
///
/// Rounding leftovers go to the non-empty slices with the largest
/// fractional remainders, so the strip is always exactly `width` cells wide
/// (or empty when every value is zero).
pub fn strip_widths(values: &[u64], width: u16) -> Vec<u16> {
    let total: u64 = values.iter().sum();
    if total == 0 || width == 0 {
        return vec![0; values.len()];
    }

    let exact: Vec<f64> = values
        .iter()
        .map(|&v| v as f64 / total as f64 * width as f64)
        .collect();
    let mut widths: Vec<u16> = exact.iter().map(|w| w.floor() as u16).collect();

    let mut remaining = width - widths.iter().sum::<u16>();
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        let fa = exact[a] - exact[a].floor();
        let fb = exact[b] - exact[b].floor();
        fb.total_cmp(&fa)
    });
    for idx in order {
        if remaining == 0 {
            break;
        }
        if values[idx] > 0 {
            widths[idx] += 1;
            remaining -= 1;
        }
    }
    widths
}

fn share_strip(app: &App, slices: &[SentimentSlice], width: u16) -> Line<'static> {
    let values: Vec<u64> = slices.iter().map(|s| s.value).collect();
    let widths = strip_widths(&values, width);

    let spans: Vec<Span> = slices
        .iter()
        .zip(widths)
        .filter(|(_, w)| *w > 0)
        .map(|(slice, w)| {
            Span::styled(
                "█".repeat(w as usize),
                Style::default().fg(app.theme.sentiment_color(slice.label)),
            )
        })
        .collect();
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_widths_fill_exactly() {
        let widths = strip_widths(&[5, 3, 2], 20);
        assert_eq!(widths, vec![10, 6, 4]);

        let widths = strip_widths(&[1, 1, 1], 10);
        assert_eq!(widths.iter().sum::<u16>(), 10);
    }

    #[test]
    fn test_strip_widths_all_zero() {
        assert_eq!(strip_widths(&[0, 0, 0], 10), vec![0, 0, 0]);
    }

    #[test]
    fn test_strip_widths_skip_empty_slices() {
        let widths = strip_widths(&[0, 1, 2], 10);
        assert_eq!(widths[0], 0);
        assert_eq!(widths.iter().sum::<u16>(), 10);
    }
}
