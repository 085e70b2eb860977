//! Wire envelopes and request bodies for the platform REST API.

use serde::{Deserialize, Serialize};

/// Every backend response wraps its payload in `{"data": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Body of `POST /session/create` — asks the backend to email an OTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub email: String,
}

/// Body of `POST /session/validate` — exchanges email+OTP for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateSessionRequest {
    pub email: String,
    pub otp: String,
}

/// Body of `POST /message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub chat_id: String,
    pub content: String,
}
