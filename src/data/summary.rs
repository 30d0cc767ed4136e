//! Aggregate sentiment summary and distribution slices.

use serde::Serialize;

use super::payload::SummaryPayload;

/// The three sentiment classes, in legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// All labels in their fixed display order.
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }

    /// Match a free-form label from the backend (case-insensitive).
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(SentimentLabel::Positive),
            "negative" => Some(SentimentLabel::Negative),
            "neutral" => Some(SentimentLabel::Neutral),
            _ => None,
        }
    }
}

/// One segment of the distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSlice {
    pub id: u8,
    pub value: u64,
    pub label: SentimentLabel,
}

/// Headline numbers shown in the summary tiles.
///
/// Percentages are pre-formatted with two decimals (`"50.00"`), or `"0"`
/// when there are no messages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSummary {
    pub total_messages: u64,
    pub positive: String,
    pub negative: String,
    pub neutral: String,
}

/// Placeholder shown for a percentage with a zero denominator.
pub const ZERO_PERCENT: &str = "0";

impl Default for SentimentSummary {
    fn default() -> Self {
        Self {
            total_messages: 0,
            positive: ZERO_PERCENT.to_string(),
            negative: ZERO_PERCENT.to_string(),
            neutral: ZERO_PERCENT.to_string(),
        }
    }
}

/// Result of normalizing one summary payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SentimentSnapshot {
    pub chart_data: Vec<SentimentSlice>,
    pub summary: SentimentSummary,
}

/// `part` as a percentage of `total`, clamped to [0, 100].
///
/// Returns `None` when `total` is zero.
pub(crate) fn percent_of(part: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some((part as f64 / total as f64 * 100.0).clamp(0.0, 100.0))
}

/// Round to two decimals, halves away from zero.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn format_percent(part: u64, total: u64) -> String {
    // `{:.2}` alone would round ties to even ("3.12" for 1/32).
    percent_of(part, total)
        .map(|p| format!("{:.2}", round2(p)))
        .unwrap_or_else(|| ZERO_PERCENT.to_string())
}

/// Turn a raw summary payload into tile values and chart slices.
///
/// Absent counts are treated as zero. The slices are always emitted in
/// Positive, Negative, Neutral order with ids 0, 1, 2 so chart colors and
/// legend order stay stable between polls.
pub fn format_sentiment_data(raw: &SummaryPayload) -> SentimentSnapshot {
    let total = raw.total_messages.unwrap_or(0);
    let positive = raw.total_positive.unwrap_or(0);
    let negative = raw.total_negative.unwrap_or(0);
    let neutral = raw.total_neutral.unwrap_or(0);

    let chart_data = SentimentLabel::ALL
        .iter()
        .zip([positive, negative, neutral])
        .enumerate()
        .map(|(id, (label, value))| SentimentSlice {
            id: id as u8,
            value,
            label: *label,
        })
        .collect();

    SentimentSnapshot {
        chart_data,
        summary: SentimentSummary {
            total_messages: total,
            positive: format_percent(positive, total),
            negative: format_percent(negative, total),
            neutral: format_percent(neutral, total),
        },
    }
}
