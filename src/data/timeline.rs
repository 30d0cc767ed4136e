//! Time-series buckets for the sentiment-over-time chart.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::payload::BucketPayload;
use super::summary::{percent_of, round2};
use super::timestamp::parse_timestamp;

/// One time-indexed aggregation record.
///
/// Percentages are relative to the bucket's own message count.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeBucket {
    /// Parsed `check_time`; `None` if the backend sent something unparseable.
    pub hour: Option<DateTime<Utc>>,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl TimeBucket {
    /// Values stacked in legend order: positive, positive+negative, total.
    pub fn stacked(&self) -> [f64; 3] {
        let first = self.positive;
        let second = first + self.negative;
        [first, second, second + self.neutral]
    }
}

fn bucket_percent(part: Option<u64>, total: u64) -> f64 {
    percent_of(part.unwrap_or(0), total).map(round2).unwrap_or(0.0)
}

/// Convert raw buckets into chart-ready percentages.
///
/// Output has the same length and order as the input; nothing is sorted
/// or deduplicated.
pub fn normalize_sentiment_data(raw: &[BucketPayload]) -> Vec<TimeBucket> {
    raw.iter()
        .map(|bucket| {
            let total = bucket.total_messages.unwrap_or(0);
            TimeBucket {
                hour: bucket.check_time.as_deref().and_then(parse_timestamp),
                positive: bucket_percent(bucket.total_positive_count, total),
                negative: bucket_percent(bucket.total_negative_count, total),
                neutral: bucket_percent(bucket.total_neutral_count, total),
            }
        })
        .collect()
}
