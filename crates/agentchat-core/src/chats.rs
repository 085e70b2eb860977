//! The chat list store: fetches and creates chat sessions for one user.
//!
//! Operations are split into `begin_*`/`resolve_*` pairs; the app awaits the
//! network call between them (see the session module for why).

use crate::event_bus::EventBus;
use agentchat_types::chat::Chat;
use agentchat_types::{ClientError, Result};

const FETCH_ERROR: &str = "Failed to load chats";
const CREATE_ERROR: &str = "Failed to create chatbot";

pub struct ChatList {
    chats: Vec<Chat>,
    is_loading: bool,
    error: Option<String>,
    /// User the list was last fetched (or started fetching) for.
    fetched_for: Option<String>,
}

impl ChatList {
    pub fn new() -> Self {
        Self {
            chats: Vec::new(),
            is_loading: false,
            error: None,
            fetched_for: None,
        }
    }

    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the list should be (re-)fetched for this user. True when the
    /// current user becomes known or changes, false while a fetch is already
    /// underway.
    pub fn needs_fetch(&self, user_id: &str) -> bool {
        !self.is_loading && self.fetched_for.as_deref() != Some(user_id)
    }

    pub fn begin_fetch(&mut self, user_id: &str) {
        self.is_loading = true;
        self.error = None;
        self.fetched_for = Some(user_id.to_string());
    }

    /// On success the collection is replaced wholesale. On failure the prior
    /// collection is kept and a generic notice is emitted — stale data beats
    /// an empty screen.
    pub fn resolve_fetch(&mut self, result: Result<Vec<Chat>>, bus: &EventBus) {
        self.is_loading = false;
        match result {
            Ok(chats) => {
                self.chats = chats;
            }
            Err(e) => {
                log::error!("chat list fetch failed: {e}");
                self.fail(FETCH_ERROR, bus);
            }
        }
    }

    pub fn begin_create(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// Prepends the new chat (newest first) and returns it, or emits an
    /// error notice and returns None.
    pub fn resolve_create(&mut self, result: Result<Chat>, bus: &EventBus) -> Option<Chat> {
        self.is_loading = false;
        match result {
            Ok(chat) => {
                self.chats.insert(0, chat.clone());
                bus.success("Chatbot created");
                Some(chat)
            }
            Err(e) => {
                log::error!("chat create failed: {e}");
                self.fail(CREATE_ERROR, bus);
                None
            }
        }
    }

    /// Forget which user the list belongs to, e.g. on logout.
    pub fn reset(&mut self) {
        self.chats.clear();
        self.error = None;
        self.is_loading = false;
        self.fetched_for = None;
    }

    fn fail(&mut self, message: &str, bus: &EventBus) {
        self.error = Some(message.to_string());
        bus.error(message);
    }
}

impl Default for ChatList {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject an obviously unusable create form before any request is sent.
pub fn validate_new_chat(name: &str) -> std::result::Result<(), ClientError> {
    if name.trim().is_empty() {
        return Err(ClientError::Validation("chat name is required".to_string()));
    }
    Ok(())
}
