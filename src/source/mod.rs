//! Polling of the sentiment backend.
//!
//! This module knows the three endpoints, how to fetch JSON from them
//! ([`JsonFetcher`]), and how to turn each response into an [`Update`] for
//! the dashboard. The [`Poller`] drives fetches on a fixed cadence.

mod http;
mod poller;

pub use http::HttpFetcher;
pub use poller::{Poller, PollerHandle};

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::Settings;
use crate::data::{
    format_sentiment_data, normalize_messages, normalize_sentiment_data, BucketPayload, Message,
    MessagesPayload, SentimentSnapshot, SummaryPayload, TimeBucket,
};
use crate::error::FetchError;

/// The backend endpoints polled by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Aggregate counts.
    Summary,
    /// Recent scored messages.
    Messages,
    /// Per-bucket counts over time.
    Timeline,
}

impl Endpoint {
    /// All endpoints, in the order fetches are issued.
    pub const ALL: [Endpoint; 3] = [Endpoint::Summary, Endpoint::Messages, Endpoint::Timeline];

    /// Default path relative to the backend base URL.
    pub fn default_path(&self) -> &'static str {
        match self {
            Endpoint::Summary => "/stats/sentiment/summary",
            Endpoint::Messages => "/messages/sentiment",
            Endpoint::Timeline => "/stats/sentiment/iter",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Endpoint::Summary => 0,
            Endpoint::Messages => 1,
            Endpoint::Timeline => 2,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Endpoint::Summary => "summary",
            Endpoint::Messages => "messages",
            Endpoint::Timeline => "timeline",
        })
    }
}

/// Fully resolved URLs for each endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointUrls {
    pub summary: String,
    pub messages: String,
    pub timeline: String,
}

impl EndpointUrls {
    /// Join a base URL with the default endpoint paths.
    pub fn from_base(base_url: &str) -> Self {
        Self {
            summary: join_url(base_url, Endpoint::Summary.default_path()),
            messages: join_url(base_url, Endpoint::Messages.default_path()),
            timeline: join_url(base_url, Endpoint::Timeline.default_path()),
        }
    }

    /// Resolve URLs from settings (base URL plus per-endpoint paths).
    pub fn from_settings(settings: &Settings) -> Self {
        let base = settings.base_url.as_str();
        Self {
            summary: join_url(base, &settings.endpoints.summary),
            messages: join_url(base, &settings.endpoints.messages),
            timeline: join_url(base, &settings.endpoints.timeline),
        }
    }

    pub fn get(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Summary => &self.summary,
            Endpoint::Messages => &self.messages,
            Endpoint::Timeline => &self.timeline,
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// A freshly normalized snapshot for one slice of dashboard state.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    Summary(SentimentSnapshot),
    Messages(Vec<Message>),
    Timeline(Vec<TimeBucket>),
}

impl Update {
    /// Decode and normalize a JSON body received from `endpoint`.
    pub fn from_json(endpoint: Endpoint, body: Value) -> Result<Self, FetchError> {
        Ok(match endpoint {
            Endpoint::Summary => {
                let raw: SummaryPayload = serde_json::from_value(body)?;
                Update::Summary(format_sentiment_data(&raw))
            }
            Endpoint::Messages => {
                let raw: MessagesPayload = serde_json::from_value(body)?;
                Update::Messages(normalize_messages(raw))
            }
            Endpoint::Timeline => {
                let raw: Vec<BucketPayload> = serde_json::from_value(body)?;
                Update::Timeline(normalize_sentiment_data(&raw))
            }
        })
    }

    /// The endpoint this update came from.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Update::Summary(_) => Endpoint::Summary,
            Update::Messages(_) => Endpoint::Messages,
            Update::Timeline(_) => Endpoint::Timeline,
        }
    }
}

/// Trait for fetching a JSON document with a plain GET.
///
/// Implementations must treat non-success statuses as errors. The poller
/// only depends on this trait, so tests can substitute an in-memory fetcher.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;

    /// Returns a human-readable description of the backend.
    fn description(&self) -> &str;
}

/// Fetch one endpoint and normalize the result.
pub async fn poll_endpoint(
    fetcher: &dyn JsonFetcher,
    endpoint: Endpoint,
    url: &str,
) -> Result<Update, FetchError> {
    let body = fetcher.get_json(url).await?;
    Update::from_json(endpoint, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_urls_from_base() {
        let urls = EndpointUrls::from_base("http://localhost:8000/");
        assert_eq!(urls.summary, "http://localhost:8000/stats/sentiment/summary");
        assert_eq!(urls.messages, "http://localhost:8000/messages/sentiment");
        assert_eq!(urls.timeline, "http://localhost:8000/stats/sentiment/iter");
    }

    #[test]
    fn test_join_url_keeps_absolute_path() {
        assert_eq!(
            join_url("http://localhost:8000", "https://other.example/summary"),
            "https://other.example/summary"
        );
        assert_eq!(join_url("http://h/api", "stats"), "http://h/api/stats");
    }

    #[test]
    fn test_update_from_summary_json() {
        let body = json!({
            "total_messages": 10, "total_positive": 5, "total_negative": 3, "total_neutral": 2
        });
        let update = Update::from_json(Endpoint::Summary, body).unwrap();
        let Update::Summary(snapshot) = update else {
            panic!("expected summary update");
        };
        assert_eq!(snapshot.summary.positive, "50.00");
    }

    #[test]
    fn test_update_from_timeline_json() {
        let body = json!([
            { "check_time": "2024-01-01T00:00:00Z", "total_messages": 4,
              "total_positive_count": 2, "total_negative_count": 1, "total_neutral_count": 1 }
        ]);
        let update = Update::from_json(Endpoint::Timeline, body).unwrap();
        assert_eq!(update.endpoint(), Endpoint::Timeline);
    }

    #[test]
    fn test_update_rejects_wrong_shape() {
        let err = Update::from_json(Endpoint::Timeline, json!({ "not": "an array" })).unwrap_err();
        assert!(matches!(err, FetchError::Shape(_)));
    }

    #[test]
    fn test_endpoint_display() {
        assert_eq!(Endpoint::Summary.to_string(), "summary");
        assert_eq!(Endpoint::Timeline.to_string(), "timeline");
    }
}
