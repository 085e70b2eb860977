use serde::{Deserialize, Serialize};

/// Severity of a user-facing notice (rendered as a toast).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Events flowing from async operations to the UI, drained once per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// A user-facing notification.
    Notice { kind: NoticeKind, text: String },
    /// The backend accepted the email and mailed an OTP.
    OtpRequested,
    /// The OTP request failed before a code was sent.
    OtpRequestFailed,
    /// The OTP exchange succeeded; the session store is now authenticated.
    LoginSucceeded,
    /// The OTP exchange was rejected.
    LoginFailed,
    /// A chat was created and prepended to the list.
    ChatCreated,
    /// The HTTP layer observed a 401 and evicted the stored credential.
    SessionExpired,
}
