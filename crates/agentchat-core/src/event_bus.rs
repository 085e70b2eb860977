//! Simple event bus for decoupled communication between async operations
//! and the UI.
//!
//! The bus is single-threaded (WASM constraint) and uses interior mutability
//! via RefCell. Events are buffered and drained by the UI on each frame.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use agentchat_types::event::{AppEvent, NoticeKind};

/// Shared event bus — clone-cheap via Rc.
#[derive(Clone)]
pub struct EventBus {
    inner: Rc<RefCell<VecDeque<AppEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Publish an event. Called by the stores and dispatchers.
    pub fn emit(&self, event: AppEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    /// Emit a success notice (shown as a toast).
    pub fn success(&self, text: impl Into<String>) {
        self.emit(AppEvent::Notice {
            kind: NoticeKind::Success,
            text: text.into(),
        });
    }

    /// Emit an error notice (shown as a toast).
    pub fn error(&self, text: impl Into<String>) {
        self.emit(AppEvent::Notice {
            kind: NoticeKind::Error,
            text: text.into(),
        });
    }

    /// Drain all pending events. Called by the UI layer each frame.
    pub fn drain(&self) -> Vec<AppEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    /// Check if there are pending events (useful for egui repaint triggers).
    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
