//! View-level gates that pick a screen from the session state.
//!
//! Both guards render a loading placeholder until the session store has
//! settled its one-time initialization, so no routing decision ever runs
//! against an uninitialized session.

use agentchat_core::session::AuthSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Login,
    Home,
}

/// Gate for authenticated-only views: home when authenticated, otherwise
/// the login view.
pub fn auth_guard(session: &AuthSession) -> Screen {
    if !session.is_initialized() {
        Screen::Loading
    } else if session.is_authenticated() {
        Screen::Home
    } else {
        Screen::Login
    }
}

/// Gate for guest-only views: lets an unauthenticated visitor reach the
/// login flow and redirects an authenticated one home. Symmetric with
/// [`auth_guard`], so the screen mapping is shared.
pub fn guest_guard(session: &AuthSession) -> Screen {
    auth_guard(session)
}
