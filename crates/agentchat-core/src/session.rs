//! The tab-wide auth session store.
//!
//! Lifecycle: `Uninitialized -> Initializing -> {Authenticated,
//! Unauthenticated}`, then `Authenticated -> Unauthenticated` via logout or
//! a 401 observed by the HTTP layer. The only way back to `Authenticated`
//! is a successful OTP login.
//!
//! egui renders from this store every frame, so all operations here are
//! synchronous phase transitions; the app performs the storage and network
//! awaits between them and never holds a borrow across an await.

use serde::{Deserialize, Serialize};

use crate::ports::ApiPort;
use crate::token;
use agentchat_types::user::{AuthData, User};

/// Single storage key holding the whole session. User and token are
/// persisted together in one record so login/logout write and clear
/// atomically.
pub const SESSION_KEY: &str = "agentchat:session";

/// What gets persisted to durable storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user: User,
    pub access_token: String,
}

impl SessionRecord {
    /// Parse a record previously written by [`SessionRecord::serialize`].
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn serialize(&self) -> agentchat_types::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Initializing,
    Authenticated,
    Unauthenticated,
}

pub struct AuthSession {
    user: Option<User>,
    access_token: Option<String>,
    phase: SessionPhase,
}

impl AuthSession {
    pub fn new() -> Self {
        Self {
            user: None,
            access_token: None,
            phase: SessionPhase::Uninitialized,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Invariant: authenticated iff both user and token are present.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.access_token.is_some()
    }

    /// True once initialization has settled. Gates every guard decision.
    pub fn is_initialized(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Authenticated | SessionPhase::Unauthenticated
        )
    }

    /// Start initialization. Returns false if it already ran, so the
    /// restore only ever happens once per tab.
    pub fn begin_initialize(&mut self) -> bool {
        if self.phase != SessionPhase::Uninitialized {
            return false;
        }
        self.phase = SessionPhase::Initializing;
        true
    }

    /// Settle initialization with whatever the durable storage held.
    /// Restores the session and re-arms the bearer only when the persisted
    /// token still validates; anything else lands in `Unauthenticated`.
    pub fn complete_initialize(&mut self, restored: Option<SessionRecord>, api: &dyn ApiPort) {
        match restored {
            Some(record) if token::is_valid(&record.access_token) => {
                log::info!("session restored for {}", record.user.email);
                api.set_bearer(Some(record.access_token.clone()));
                self.user = Some(record.user);
                self.access_token = Some(record.access_token);
                self.phase = SessionPhase::Authenticated;
            }
            Some(_) => {
                log::info!("persisted session token expired, starting unauthenticated");
                self.phase = SessionPhase::Unauthenticated;
            }
            None => {
                self.phase = SessionPhase::Unauthenticated;
            }
        }
    }

    /// Install a freshly exchanged session and arm the bearer. Returns the
    /// record the caller persists under [`SESSION_KEY`]. A failed exchange
    /// never reaches this method, so prior state stays untouched on error.
    pub fn complete_login(&mut self, auth: AuthData, api: &dyn ApiPort) -> SessionRecord {
        let record = SessionRecord {
            user: auth.user.clone(),
            access_token: auth.access_token.clone(),
        };
        api.set_bearer(Some(auth.access_token.clone()));
        self.user = Some(auth.user);
        self.access_token = Some(auth.access_token);
        self.phase = SessionPhase::Authenticated;
        record
    }

    /// Clear in-memory state and disarm the bearer. Never fails; the caller
    /// deletes the persisted record best-effort.
    pub fn logout(&mut self, api: &dyn ApiPort) {
        self.user = None;
        self.access_token = None;
        self.phase = SessionPhase::Unauthenticated;
        api.set_bearer(None);
    }

    /// 401 path: the HTTP layer already evicted the stored credential, this
    /// just drops the in-memory half.
    pub fn expire(&mut self) {
        if self.is_authenticated() {
            log::warn!("session expired (401 from backend)");
        }
        self.user = None;
        self.access_token = None;
        if self.is_initialized() {
            self.phase = SessionPhase::Unauthenticated;
        }
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}
