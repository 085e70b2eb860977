use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted message with a server-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub content: String,
    pub is_user_message: bool,
    pub created_at: DateTime<Utc>,
}

/// One entry in a chat's message log.
///
/// Optimistic entries created during a send carry locally-generated ids and
/// are distinguished by variant, so the log can filter or replace them with
/// a type-safe match instead of inspecting id prefixes.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageEntry {
    /// Confirmed by the backend.
    Persisted(Message),
    /// The user's own message, echoed locally while the send is in flight.
    PendingEcho {
        local_id: String,
        content: String,
        created_at: DateTime<Utc>,
    },
    /// "Bot is typing" placeholder, removed once the reply (or an error)
    /// arrives.
    PendingReply { local_id: String },
}

impl MessageEntry {
    /// Whether this entry renders on the user's side of the conversation.
    pub fn is_from_user(&self) -> bool {
        match self {
            MessageEntry::Persisted(m) => m.is_user_message,
            MessageEntry::PendingEcho { .. } => true,
            MessageEntry::PendingReply { .. } => false,
        }
    }

    /// Display text, if the entry has settled content.
    pub fn text(&self) -> Option<&str> {
        match self {
            MessageEntry::Persisted(m) => Some(&m.content),
            MessageEntry::PendingEcho { content, .. } => Some(content),
            MessageEntry::PendingReply { .. } => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        !matches!(self, MessageEntry::Persisted(_))
    }
}
