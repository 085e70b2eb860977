//! Port traits — the hexagonal architecture boundary.
//!
//! These traits are defined here in `agentchat-core` (pure Rust).
//! Implementations live in `agentchat-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use agentchat_types::{
    chat::{Chat, CreateChatRequest},
    message::Message,
    user::AuthData,
    Result,
};

// ─── API Port ────────────────────────────────────────────────

/// The platform REST backend. Each call is fire-once: no retry, no
/// backoff, no deduplication.
#[async_trait(?Send)]
pub trait ApiPort {
    /// `POST /session/create` — ask the backend to email an OTP.
    async fn request_otp(&self, email: &str) -> Result<()>;

    /// `POST /session/validate` — exchange email+OTP for a session.
    async fn validate_otp(&self, email: &str, otp: &str) -> Result<AuthData>;

    /// `GET /chat?userId=<id>`
    async fn list_chats(&self, user_id: &str) -> Result<Vec<Chat>>;

    /// `POST /chat`
    async fn create_chat(&self, req: &CreateChatRequest) -> Result<Chat>;

    /// `GET /message?chatId=<id>`
    async fn list_messages(&self, chat_id: &str) -> Result<Vec<Message>>;

    /// `POST /message` — returns the bot's reply.
    async fn send_message(&self, chat_id: &str, content: &str) -> Result<Message>;

    /// Arm (or disarm, with `None`) the default bearer credential attached
    /// to every subsequent request.
    fn set_bearer(&self, token: Option<String>);
}

// ─── Storage Port ────────────────────────────────────────────

/// Durable key-value storage. Values are strings because the browser
/// backend is `localStorage`.
#[async_trait(?Send)]
pub trait StoragePort {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
