//! Raw payloads returned by the sentiment backend.
//!
//! These types mirror the JSON contracts of the three endpoints. Every field
//! is optional so that a partially populated payload still decodes; the
//! normalizers decide what an absent field means.

use serde::{Deserialize, Serialize};

/// Body of `GET /stats/sentiment/summary`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryPayload {
    #[serde(default)]
    pub total_messages: Option<u64>,
    #[serde(default)]
    pub total_positive: Option<u64>,
    #[serde(default)]
    pub total_negative: Option<u64>,
    #[serde(default)]
    pub total_neutral: Option<u64>,
}

/// Body of `GET /messages/sentiment`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagesPayload {
    #[serde(default)]
    pub messages: Vec<MessagePayload>,
}

/// One entry of [`MessagesPayload::messages`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePayload {
    #[serde(default)]
    pub id: MessageId,
    #[serde(default)]
    pub latest_post_time: Option<String>,
    #[serde(default)]
    pub message_content: Option<String>,
    #[serde(default)]
    pub thread_url: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
}

/// Message identifier. The backend may send either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageId {
    Number(i64),
    Text(String),
}

impl Default for MessageId {
    fn default() -> Self {
        MessageId::Number(0)
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageId::Number(n) => write!(f, "{}", n),
            MessageId::Text(s) => f.write_str(s),
        }
    }
}

/// One element of the array returned by `GET /stats/sentiment/iter`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketPayload {
    #[serde(default)]
    pub check_time: Option<String>,
    #[serde(default)]
    pub total_messages: Option<u64>,
    #[serde(default)]
    pub total_positive_count: Option<u64>,
    #[serde(default)]
    pub total_negative_count: Option<u64>,
    #[serde(default)]
    pub total_neutral_count: Option<u64>,
}
