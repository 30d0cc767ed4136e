//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::SentimentLabel;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for positive sentiment.
    pub positive: Color,
    /// Color for negative sentiment.
    pub negative: Color,
    /// Color for neutral sentiment.
    pub neutral: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Color for secondary text (timestamps, hints).
    pub muted: Color,
    /// Style for panel titles and tile headings.
    pub header: Style,
    /// Style for the selected message card.
    pub selected: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            positive: Color::Green,
            negative: Color::Red,
            neutral: Color::Yellow,
            border: Color::Gray,
            muted: Color::DarkGray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            positive: Color::Green,
            negative: Color::Red,
            neutral: Color::Magenta,
            border: Color::DarkGray,
            muted: Color::Gray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Color used for a sentiment class.
    pub fn sentiment_color(&self, label: SentimentLabel) -> Color {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }

    /// Style for a free-form sentiment label from a message.
    ///
    /// Unknown labels are shown unstyled.
    pub fn sentiment_style(&self, label: &str) -> Style {
        match SentimentLabel::parse(label) {
            Some(label) => Style::default()
                .fg(self.sentiment_color(label))
                .add_modifier(Modifier::BOLD),
            None => Style::default(),
        }
    }
}
