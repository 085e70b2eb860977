use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A chat session bound to one bot and one user. Immutable after creation
/// from the client's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    pub bot_id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

/// Body of `POST /chat`. The backend creates the bot together with the chat,
/// so name and description are sent twice under different keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChatRequest {
    pub chat_name: String,
    pub bot_name: String,
    pub chat_description: String,
    pub bot_description: String,
    pub user_id: String,
}

impl CreateChatRequest {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let description = description.into();
        Self {
            chat_name: name.clone(),
            bot_name: name,
            chat_description: description.clone(),
            bot_description: description,
            user_id: user_id.into(),
        }
    }
}
