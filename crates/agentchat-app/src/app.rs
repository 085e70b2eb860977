//! Main egui application — routes between screens and dispatches async work.
//!
//! The stores live in `Rc<RefCell<_>>` so the `spawn_local` futures can
//! settle them when a network call resolves. Borrows are only taken between
//! awaits, never across one, because the panels read the same stores every
//! frame.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, Align2, CentralPanel, RichText, Vec2};

use agentchat_core::chats::ChatList;
use agentchat_core::event_bus::EventBus;
use agentchat_core::messages::MessageLog;
use agentchat_core::ports::{ApiPort, StoragePort};
use agentchat_core::session::{AuthSession, SessionRecord, SESSION_KEY};
use agentchat_platform::storage::auto_detect_storage;
use agentchat_platform::RestClient;
use agentchat_types::chat::CreateChatRequest;
use agentchat_types::config::AppConfig;
use agentchat_types::event::{AppEvent, NoticeKind};
use agentchat_ui::guards::{auth_guard, Screen};
use agentchat_ui::panels::chat_modal::{chat_modal, ChatAction};
use agentchat_ui::panels::home::{home_panel, HomeAction};
use agentchat_ui::panels::login::{login_panel, LoginAction};
use agentchat_ui::state::UiState;
use agentchat_ui::theme;

/// The main application state
pub struct ChatApp {
    bus: EventBus,
    session: Rc<RefCell<AuthSession>>,
    chats: Rc<RefCell<ChatList>>,
    messages: Rc<RefCell<MessageLog>>,
    api: Rc<RestClient>,
    storage: Rc<dyn StoragePort>,
    ui_state: UiState,
    first_frame: bool,
}

impl ChatApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::default();
        let bus = EventBus::new();
        let storage = auto_detect_storage();
        let api = Rc::new(RestClient::new(&config, storage.clone(), bus.clone()));

        log::info!(
            "backend: {} | storage: {}",
            config.api_base,
            storage.backend_name()
        );

        Self {
            bus,
            session: Rc::new(RefCell::new(AuthSession::new())),
            chats: Rc::new(RefCell::new(ChatList::new())),
            messages: Rc::new(RefCell::new(MessageLog::new())),
            api,
            storage,
            ui_state: UiState::new(),
            first_frame: true,
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.dispatch_initialize(ctx);
            self.first_frame = false;
        }

        // Drain events from the async dispatchers
        let events = self.bus.drain();
        if !events.is_empty() {
            if events.iter().any(|e| matches!(e, AppEvent::SessionExpired)) {
                self.session.borrow_mut().expire();
                self.drop_authenticated_state();
            }
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        // Keep spinners animated while anything is in flight
        {
            let messages = self.messages.borrow();
            if self.chats.borrow().is_loading() || messages.is_loading() || messages.is_sending()
            {
                ctx.request_repaint();
            }
        }

        // Bind the screen first so no session borrow is held while the
        // handlers below take `borrow_mut`.
        let screen = auth_guard(&self.session.borrow());
        match screen {
            Screen::Loading => {
                CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                });
            }
            Screen::Login => {
                let mut action = None;
                CentralPanel::default().show(ctx, |ui| {
                    action = login_panel(ui, &mut self.ui_state);
                });
                if let Some(action) = action {
                    self.handle_login_action(action, ctx);
                }
            }
            Screen::Home => self.home_screen(ctx),
        }

        self.render_toasts(ctx);
    }
}

impl ChatApp {
    fn home_screen(&mut self, ctx: &egui::Context) {
        let Some(user) = self.session.borrow().user().cloned() else {
            return;
        };

        // Auto-fetch whenever the current user becomes known or changes.
        if self.chats.borrow().needs_fetch(&user.id) {
            self.dispatch_fetch_chats(user.id.clone(), ctx);
        }

        let mut home_action = None;
        CentralPanel::default().show(ctx, |ui| {
            home_action = home_panel(ui, &mut self.ui_state, &user, &self.chats.borrow());
        });

        let mut modal_action = None;
        if let Some(chat) = self.ui_state.selected_chat.clone() {
            modal_action = chat_modal(ctx, &mut self.ui_state, &chat, &self.messages.borrow());
        }

        if let Some(action) = home_action {
            self.handle_home_action(action, &user.id, ctx);
        }
        if let Some(action) = modal_action {
            self.handle_chat_action(action, ctx);
        }
    }

    fn handle_login_action(&mut self, action: LoginAction, ctx: &egui::Context) {
        match action {
            LoginAction::SubmitEmail | LoginAction::ResendCode => {
                let email = self.ui_state.login.email.trim().to_string();
                self.dispatch_request_otp(email, ctx);
            }
            LoginAction::SubmitOtp => {
                let email = self.ui_state.login.email.trim().to_string();
                let otp = self.ui_state.login.otp.clone();
                self.dispatch_login(email, otp, ctx);
            }
        }
    }

    fn handle_home_action(&mut self, action: HomeAction, user_id: &str, ctx: &egui::Context) {
        match action {
            HomeAction::Logout => {
                self.session.borrow_mut().logout(self.api.as_ref());
                self.drop_authenticated_state();

                // Best-effort removal of the persisted record.
                let storage = self.storage.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = storage.delete(SESSION_KEY).await {
                        log::warn!("failed to clear persisted session: {e}");
                    }
                });
            }
            HomeAction::OpenChat(chat) => {
                self.messages.borrow_mut().select_chat(Some(chat.id.clone()));
                self.ui_state.selected_chat = Some(chat);
                self.dispatch_fetch_messages(ctx);
            }
            HomeAction::SubmitCreate { name, description } => {
                self.dispatch_create_chat(name, description, user_id.to_string(), ctx);
            }
        }
    }

    fn handle_chat_action(&mut self, action: ChatAction, ctx: &egui::Context) {
        match action {
            ChatAction::Send(text) => self.dispatch_send_message(&text, ctx),
            ChatAction::Close => {
                self.messages.borrow_mut().select_chat(None);
                self.ui_state.selected_chat = None;
            }
        }
    }

    /// Clear everything scoped to the signed-in user.
    fn drop_authenticated_state(&mut self) {
        self.chats.borrow_mut().reset();
        self.messages.borrow_mut().select_chat(None);
        self.ui_state.reset_for_guest();
    }

    // ─── Async dispatchers ───────────────────────────────────

    /// Restore the persisted session, once per tab.
    fn dispatch_initialize(&self, ctx: &egui::Context) {
        if !self.session.borrow_mut().begin_initialize() {
            return;
        }
        let session = self.session.clone();
        let api = self.api.clone();
        let storage = self.storage.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let restored = match storage.get(SESSION_KEY).await {
                Ok(Some(raw)) => SessionRecord::parse(&raw),
                Ok(None) => None,
                Err(e) => {
                    log::warn!("failed to read persisted session: {e}");
                    None
                }
            };
            session.borrow_mut().complete_initialize(restored, api.as_ref());
            ctx.request_repaint();
        });
    }

    fn dispatch_request_otp(&self, email: String, ctx: &egui::Context) {
        let api = self.api.clone();
        let bus = self.bus.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            match api.request_otp(&email).await {
                Ok(()) => {
                    bus.success("Code sent to your email");
                    bus.emit(AppEvent::OtpRequested);
                }
                Err(e) => {
                    log::error!("OTP request failed: {e}");
                    bus.emit(AppEvent::OtpRequestFailed);
                }
            }
            ctx.request_repaint();
        });
    }

    fn dispatch_login(&self, email: String, otp: String, ctx: &egui::Context) {
        let api = self.api.clone();
        let bus = self.bus.clone();
        let session = self.session.clone();
        let storage = self.storage.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            match api.validate_otp(&email, &otp).await {
                Ok(auth) => {
                    let record = session.borrow_mut().complete_login(auth, api.as_ref());
                    match record.serialize() {
                        Ok(raw) => {
                            if let Err(e) = storage.set(SESSION_KEY, &raw).await {
                                log::warn!("failed to persist session: {e}");
                            }
                        }
                        Err(e) => log::warn!("failed to serialize session: {e}"),
                    }
                    bus.success("Signed in");
                    bus.emit(AppEvent::LoginSucceeded);
                }
                Err(e) => {
                    log::error!("login failed: {e}");
                    bus.emit(AppEvent::LoginFailed);
                }
            }
            ctx.request_repaint();
        });
    }

    fn dispatch_fetch_chats(&self, user_id: String, ctx: &egui::Context) {
        self.chats.borrow_mut().begin_fetch(&user_id);
        let api = self.api.clone();
        let bus = self.bus.clone();
        let chats = self.chats.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let result = api.list_chats(&user_id).await;
            chats.borrow_mut().resolve_fetch(result, &bus);
            ctx.request_repaint();
        });
    }

    fn dispatch_create_chat(
        &self,
        name: String,
        description: String,
        user_id: String,
        ctx: &egui::Context,
    ) {
        if let Err(e) = agentchat_core::chats::validate_new_chat(&name) {
            log::warn!("rejected create: {e}");
            return;
        }
        self.chats.borrow_mut().begin_create();
        let api = self.api.clone();
        let bus = self.bus.clone();
        let chats = self.chats.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let req = CreateChatRequest::new(name, description, user_id);
            let result = api.create_chat(&req).await;
            if chats.borrow_mut().resolve_create(result, &bus).is_some() {
                bus.emit(AppEvent::ChatCreated);
            }
            ctx.request_repaint();
        });
    }

    fn dispatch_fetch_messages(&self, ctx: &egui::Context) {
        let Some(chat_id) = self.messages.borrow_mut().begin_fetch() else {
            return;
        };
        let api = self.api.clone();
        let bus = self.bus.clone();
        let messages = self.messages.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let result = api.list_messages(&chat_id).await;
            messages.borrow_mut().resolve_fetch(result, &bus);
            ctx.request_repaint();
        });
    }

    fn dispatch_send_message(&self, text: &str, ctx: &egui::Context) {
        let Some(ticket) = self.messages.borrow_mut().begin_send(text) else {
            return;
        };
        let api = self.api.clone();
        let bus = self.bus.clone();
        let messages = self.messages.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let result = api.send_message(&ticket.chat_id, &ticket.content).await;
            messages.borrow_mut().resolve_send(&ticket, result, &bus);
            ctx.request_repaint();
        });
    }

    // ─── Toasts ──────────────────────────────────────────────

    fn render_toasts(&mut self, ctx: &egui::Context) {
        if self.ui_state.toasts.is_empty() {
            return;
        }
        let mut dismiss = None;

        egui::Area::new(egui::Id::new("toasts"))
            .anchor(Align2::RIGHT_TOP, Vec2::new(-12.0, 12.0))
            .show(ctx, |ui| {
                for (i, toast) in self.ui_state.toasts.iter().enumerate() {
                    let color = match toast.kind {
                        NoticeKind::Success => theme::SUCCESS,
                        NoticeKind::Error => theme::ERROR,
                    };
                    egui::Frame::default()
                        .fill(theme::BG_SECONDARY)
                        .corner_radius(theme::PANEL_ROUNDING)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(&toast.text).color(color));
                                if ui.small_button("✕").clicked() {
                                    dismiss = Some(i);
                                }
                            });
                        });
                    ui.add_space(4.0);
                }
            });

        if let Some(i) = dismiss {
            self.ui_state.dismiss_toast(i);
        }
    }
}
