use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated actor. Created server-side; the client only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub secret: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload of a successful OTP exchange (`POST /session/validate`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    pub user: User,
    pub access_token: String,
}
