//! The message log store for the currently open chat.
//!
//! Sends are optimistic: the user's text and a "typing" placeholder are
//! appended immediately as pending entries, and the placeholder is swapped
//! for the real bot reply (or removed on failure) when the request settles.
//! The optimistic user echo is intentionally never reconciled with a
//! server-assigned id; it stays until the next fetch or chat switch.

use chrono::Utc;
use uuid::Uuid;

use crate::event_bus::EventBus;
use agentchat_types::message::{Message, MessageEntry};
use agentchat_types::Result;

const FETCH_ERROR: &str = "Failed to load messages";
const SEND_ERROR: &str = "Failed to send message";

/// Everything the app needs to carry out a send begun with
/// [`MessageLog::begin_send`].
#[derive(Debug, Clone, PartialEq)]
pub struct SendTicket {
    pub chat_id: String,
    pub content: String,
    pub reply_id: String,
}

pub struct MessageLog {
    chat_id: Option<String>,
    entries: Vec<MessageEntry>,
    is_loading: bool,
    is_sending: bool,
    error: Option<String>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self {
            chat_id: None,
            entries: Vec::new(),
            is_loading: false,
            is_sending: false,
            error: None,
        }
    }

    pub fn chat_id(&self) -> Option<&str> {
        self.chat_id.as_deref()
    }

    pub fn entries(&self) -> &[MessageEntry] {
        &self.entries
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_sending(&self) -> bool {
        self.is_sending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Switch to another chat (or close with `None`). A change clears the
    /// log and error state; the caller follows up with a fresh fetch.
    pub fn select_chat(&mut self, chat_id: Option<String>) {
        if self.chat_id == chat_id {
            return;
        }
        self.chat_id = chat_id;
        self.clear();
    }

    /// Reset collection and error state. The sending flag survives: it
    /// belongs to the in-flight send, not to the current chat, and only
    /// that send's resolution lifts it. At most one send is ever in
    /// flight, across chat switches included.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.error = None;
        self.is_loading = false;
    }

    /// Start a fetch for the selected chat. No-op (None) when nothing is
    /// selected. An in-flight send does not block this.
    pub fn begin_fetch(&mut self) -> Option<String> {
        let chat_id = self.chat_id.clone()?;
        self.is_loading = true;
        self.error = None;
        Some(chat_id)
    }

    /// Replace the log with the fetched messages, sorted ascending by
    /// creation time regardless of backend order. On failure the current
    /// entries are kept. There is no generation guard: whichever fetch
    /// resolves last wins.
    pub fn resolve_fetch(&mut self, result: Result<Vec<Message>>, bus: &EventBus) {
        self.is_loading = false;
        match result {
            Ok(mut messages) => {
                messages.sort_by_key(|m| m.created_at);
                self.entries = messages.into_iter().map(MessageEntry::Persisted).collect();
            }
            Err(e) => {
                log::error!("message fetch failed: {e}");
                self.error = Some(FETCH_ERROR.to_string());
                bus.error(FETCH_ERROR);
            }
        }
    }

    /// Start a send. Returns None — and appends nothing — when the content
    /// is empty or whitespace, a send is already in flight, or no chat is
    /// selected. Otherwise appends the optimistic user echo and the typing
    /// placeholder and hands back the ticket for the network call.
    pub fn begin_send(&mut self, content: &str) -> Option<SendTicket> {
        let content = content.trim();
        if content.is_empty() || self.is_sending {
            return None;
        }
        let chat_id = self.chat_id.clone()?;

        self.is_sending = true;
        self.error = None;

        self.entries.push(MessageEntry::PendingEcho {
            local_id: Uuid::new_v4().to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        });
        let reply_id = Uuid::new_v4().to_string();
        self.entries.push(MessageEntry::PendingReply {
            local_id: reply_id.clone(),
        });

        Some(SendTicket {
            chat_id,
            content: content.to_string(),
            reply_id,
        })
    }

    /// Settle the send begun with the given ticket. Always lifts the
    /// sending flag. When the selection moved to another chat in the
    /// meantime the stale result is dropped without touching the log or
    /// emitting a notice. Otherwise the typing placeholder is removed; on
    /// success the bot reply is appended, on failure the user echo stays
    /// put and an error notice is emitted. Returns whether the send
    /// succeeded and landed in the current chat.
    pub fn resolve_send(
        &mut self,
        ticket: &SendTicket,
        result: Result<Message>,
        bus: &EventBus,
    ) -> bool {
        self.is_sending = false;
        if self.chat_id.as_deref() != Some(ticket.chat_id.as_str()) {
            log::info!("dropping send result for deselected chat {}", ticket.chat_id);
            return false;
        }
        self.entries
            .retain(|e| !matches!(e, MessageEntry::PendingReply { .. }));
        match result {
            Ok(reply) => {
                self.entries.push(MessageEntry::Persisted(reply));
                true
            }
            Err(e) => {
                log::error!("message send failed: {e}");
                self.error = Some(SEND_ERROR.to_string());
                bus.error(SEND_ERROR);
                false
            }
        }
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}
