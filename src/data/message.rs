//! Recent scored messages.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::payload::{MessageId, MessagesPayload};
use super::timestamp::parse_timestamp;

/// A message as shown in the feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Message {
    pub id: MessageId,
    pub latest_post_time: Option<DateTime<Utc>>,
    pub content: String,
    pub thread_url: String,
    pub sentiment: String,
}

/// Convert the messages payload, keeping the API's order.
pub fn normalize_messages(raw: MessagesPayload) -> Vec<Message> {
    raw.messages
        .into_iter()
        .map(|m| Message {
            id: m.id,
            latest_post_time: m.latest_post_time.as_deref().and_then(parse_timestamp),
            content: m.message_content.unwrap_or_default(),
            thread_url: m.thread_url.unwrap_or_default(),
            sentiment: m.sentiment.unwrap_or_default(),
        })
        .collect()
}
