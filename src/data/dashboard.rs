//! View state for the dashboard.
//!
//! The dashboard is only ever changed through [`Dashboard::apply`], which
//! replaces one slice of state with a freshly normalized snapshot. Nothing
//! is patched in place, and nothing is cleared when an endpoint fails.

use std::time::Instant;

use serde::Serialize;

use super::history::History;
use super::message::Message;
use super::summary::{SentimentSlice, SentimentSummary};
use super::timeline::TimeBucket;
use crate::source::{Endpoint, Update};

/// Everything the views render.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dashboard {
    pub summary: SentimentSummary,
    pub slices: Vec<SentimentSlice>,
    pub timeline: Vec<TimeBucket>,
    pub messages: Vec<Message>,
    #[serde(skip)]
    pub history: History,
    #[serde(skip)]
    last_updated: [Option<Instant>; 3],
}

impl Dashboard {
    /// Create an empty dashboard (what is shown before any fetch succeeds).
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the slice of state owned by the update's endpoint.
    pub fn apply(&mut self, update: Update) {
        self.apply_at(update, Instant::now());
    }

    pub(crate) fn apply_at(&mut self, update: Update, at: Instant) {
        let endpoint = update.endpoint();
        match update {
            Update::Summary(snapshot) => {
                self.history.record(snapshot.summary.total_messages, at);
                self.summary = snapshot.summary;
                self.slices = snapshot.chart_data;
            }
            Update::Messages(messages) => {
                self.messages = messages;
            }
            Update::Timeline(buckets) => {
                self.timeline = buckets;
            }
        }
        self.last_updated[endpoint.index()] = Some(at);
    }

    /// When the given endpoint last delivered a successful snapshot.
    pub fn last_updated(&self, endpoint: Endpoint) -> Option<Instant> {
        self.last_updated[endpoint.index()]
    }

    /// Most recent successful update from any endpoint.
    pub fn latest_update(&self) -> Option<Instant> {
        self.last_updated.iter().flatten().max().copied()
    }

    /// True until the first snapshot from any endpoint arrives.
    pub fn is_empty(&self) -> bool {
        self.latest_update().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::payload::{MessageId, SummaryPayload};
    use crate::data::summary::format_sentiment_data;

    fn summary_update(total: u64) -> Update {
        Update::Summary(format_sentiment_data(&SummaryPayload {
            total_messages: Some(total),
            total_positive: Some(total),
            total_negative: Some(0),
            total_neutral: Some(0),
        }))
    }

    fn message(id: i64) -> Message {
        Message {
            id: MessageId::Number(id),
            content: format!("message {}", id),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_dashboard_is_empty() {
        let dashboard = Dashboard::new();
        assert!(dashboard.is_empty());
        assert!(dashboard.slices.is_empty());
        assert_eq!(dashboard.summary.positive, "0");
    }

    #[test]
    fn test_apply_replaces_only_its_slice() {
        let mut dashboard = Dashboard::new();
        dashboard.apply(summary_update(10));
        dashboard.apply(Update::Messages(vec![message(1), message(2)]));

        dashboard.apply(Update::Timeline(vec![TimeBucket::default()]));

        assert_eq!(dashboard.summary.total_messages, 10);
        assert_eq!(dashboard.messages.len(), 2);
        assert_eq!(dashboard.timeline.len(), 1);
        assert!(dashboard.last_updated(Endpoint::Summary).is_some());
        assert!(dashboard.last_updated(Endpoint::Timeline).is_some());
    }

    #[test]
    fn test_apply_is_wholesale_replacement() {
        let mut dashboard = Dashboard::new();
        dashboard.apply(Update::Messages(vec![message(1), message(2), message(3)]));
        dashboard.apply(Update::Messages(vec![message(9)]));

        assert_eq!(dashboard.messages, vec![message(9)]);
    }

    #[test]
    fn test_last_write_wins() {
        let mut dashboard = Dashboard::new();
        dashboard.apply(summary_update(5));
        dashboard.apply(summary_update(3));
        assert_eq!(dashboard.summary.total_messages, 3);
        assert_eq!(dashboard.history.totals.len(), 2);
    }

    #[test]
    fn test_latest_update_tracks_any_endpoint() {
        let mut dashboard = Dashboard::new();
        let start = Instant::now();
        let later = start + std::time::Duration::from_secs(1);
        dashboard.apply_at(summary_update(1), start);
        dashboard.apply_at(Update::Messages(Vec::new()), later);

        assert_eq!(dashboard.latest_update(), Some(later));
        assert!(dashboard.last_updated(Endpoint::Timeline).is_none());
    }
}
