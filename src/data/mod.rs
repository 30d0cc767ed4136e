//! Data models and normalization for the sentiment backend's payloads.
//!
//! This module turns raw JSON payloads into display-ready shapes and holds
//! the dashboard state the views render.
//!
//! ## Submodules
//!
//! - [`payload`]: Raw endpoint payloads, decoded with serde
//! - [`summary`]: Summary percentages and distribution slices
//! - [`timeline`]: Per-bucket percentages for the time-series chart
//! - [`message`]: Recent scored messages
//! - [`timestamp`]: Backend timestamp parsing and local formatting
//! - [`dashboard`]: The view state, updated by snapshot replacement
//! - [`history`]: Message-total history for the trend sparkline
//! - [`duration`]: Interval parsing ("1s", "500ms") and elapsed formatting
//!
//! ## Data Flow
//!
//! ```text
//! SummaryPayload ──▶ format_sentiment_data() ──┐
//! MessagesPayload ─▶ normalize_messages() ─────┼──▶ Update ──▶ Dashboard::apply()
//! [BucketPayload] ─▶ normalize_sentiment_data()┘
//! ```

pub mod dashboard;
pub mod duration;
pub mod history;
pub mod message;
pub mod payload;
pub mod summary;
pub mod timeline;
pub mod timestamp;

pub use dashboard::Dashboard;
pub use history::History;
pub use message::{normalize_messages, Message};
pub use payload::{BucketPayload, MessageId, MessagePayload, MessagesPayload, SummaryPayload};
pub use summary::{
    format_sentiment_data, SentimentLabel, SentimentSlice, SentimentSnapshot, SentimentSummary,
};
pub use timeline::{normalize_sentiment_data, TimeBucket};
