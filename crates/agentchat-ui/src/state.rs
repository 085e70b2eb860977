//! UI-level state that drives rendering.
//!
//! Updated each frame by draining the EventBus; the stores themselves
//! (session, chat list, message log) are read directly by the panels.

use agentchat_types::chat::Chat;
use agentchat_types::event::{AppEvent, NoticeKind};

/// Keep only the most recent notices on screen.
const MAX_TOASTS: usize = 4;

/// A user-facing notification rendered as a toast until dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub kind: NoticeKind,
    pub text: String,
}

/// Where the login flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStep {
    EnteringEmail,
    CodeSent,
}

/// The two-screen email/OTP flow.
///
/// `EnteringEmail -> CodeSent` on an accepted email; a rejected OTP keeps
/// the flow on `CodeSent` with the email preserved so the user can retry
/// or resend. Only a successful login leaves the flow (the guard redirects
/// once the session becomes authenticated).
#[derive(Debug, Clone, PartialEq)]
pub struct LoginFlow {
    pub step: LoginStep,
    pub email: String,
    pub otp: String,
    pub is_busy: bool,
    pub error: Option<String>,
}

impl LoginFlow {
    pub fn new() -> Self {
        Self {
            step: LoginStep::EnteringEmail,
            email: String::new(),
            otp: String::new(),
            is_busy: false,
            error: None,
        }
    }

    pub fn email_ready(&self) -> bool {
        let email = self.email.trim();
        !email.is_empty() && email.contains('@')
    }

    /// A submittable code is exactly six digits.
    pub fn otp_ready(&self) -> bool {
        self.otp.len() == 6 && self.otp.chars().all(|c| c.is_ascii_digit())
    }

    /// "Back" from the code screen: clears the entered code, keeps the
    /// email for editing.
    pub fn back_to_email(&mut self) {
        self.step = LoginStep::EnteringEmail;
        self.otp.clear();
        self.error = None;
    }
}

impl Default for LoginFlow {
    fn default() -> Self {
        Self::new()
    }
}

/// State visible to UI panels
pub struct UiState {
    pub login: LoginFlow,
    pub toasts: Vec<Toast>,
    /// Chat whose modal is open, if any.
    pub selected_chat: Option<Chat>,
    pub show_create_dialog: bool,
    pub create_name: String,
    pub create_description: String,
    /// Chat modal input field.
    pub message_input: String,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            login: LoginFlow::new(),
            toasts: Vec::new(),
            selected_chat: None,
            show_create_dialog: false,
            create_name: String::new(),
            create_description: String::new(),
            message_input: String::new(),
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<AppEvent>) {
        for event in events {
            match event {
                AppEvent::Notice { kind, text } => self.push_toast(kind, text),
                AppEvent::OtpRequested => {
                    self.login.is_busy = false;
                    self.login.error = None;
                    self.login.step = LoginStep::CodeSent;
                }
                AppEvent::OtpRequestFailed => {
                    self.login.is_busy = false;
                    self.login.error = Some("Could not send the code, try again.".to_string());
                    self.login.step = LoginStep::EnteringEmail;
                }
                AppEvent::LoginSucceeded => {
                    // The guard redirects; start the next visit clean.
                    self.login = LoginFlow::new();
                }
                AppEvent::LoginFailed => {
                    self.login.is_busy = false;
                    self.login.error = Some("Could not verify the code, try again.".to_string());
                }
                AppEvent::ChatCreated => {
                    self.show_create_dialog = false;
                    self.create_name.clear();
                    self.create_description.clear();
                }
                AppEvent::SessionExpired => {
                    self.selected_chat = None;
                    self.push_toast(
                        NoticeKind::Error,
                        "Session expired, please sign in again.".to_string(),
                    );
                }
            }
        }
    }

    pub fn push_toast(&mut self, kind: NoticeKind, text: String) {
        self.toasts.push(Toast { kind, text });
        if self.toasts.len() > MAX_TOASTS {
            let overflow = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..overflow);
        }
    }

    pub fn dismiss_toast(&mut self, index: usize) {
        if index < self.toasts.len() {
            self.toasts.remove(index);
        }
    }

    /// Drop per-user view state on logout or expiry.
    pub fn reset_for_guest(&mut self) {
        self.selected_chat = None;
        self.show_create_dialog = false;
        self.create_name.clear();
        self.create_description.clear();
        self.message_input.clear();
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
