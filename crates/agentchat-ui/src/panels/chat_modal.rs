//! Chat modal — conversation window for the selected chat.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};

use agentchat_core::messages::MessageLog;
use agentchat_types::chat::Chat;
use agentchat_types::message::MessageEntry;

use crate::state::UiState;
use crate::theme::*;

/// What the app should dispatch after rendering the chat modal.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatAction {
    /// Send the typed message to the open chat.
    Send(String),
    Close,
}

/// Render the modal for `chat`. Returns Some(action) on user interaction.
pub fn chat_modal(
    ctx: &egui::Context,
    state: &mut UiState,
    chat: &Chat,
    log: &MessageLog,
) -> Option<ChatAction> {
    let mut action = None;
    let mut open = true;

    egui::Window::new(&chat.name)
        .open(&mut open)
        .collapsible(false)
        .default_size(Vec2::new(480.0, 520.0))
        .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(RichText::new(&chat.description).color(TEXT_SECONDARY).small());
            ui.separator();

            // ── Messages ─────────────────────────────────────
            let input_height = 48.0;
            ScrollArea::vertical()
                .max_height(ui.available_height() - input_height)
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    if log.is_loading() && log.entries().is_empty() {
                        ui.vertical_centered(|ui| {
                            ui.spinner();
                        });
                    }
                    for entry in log.entries() {
                        render_entry(ui, entry);
                        ui.add_space(4.0);
                    }
                });

            if let Some(error) = log.error() {
                ui.label(RichText::new(error).color(ERROR).small());
            }

            // ── Input ────────────────────────────────────────
            ui.separator();
            ui.horizontal(|ui| {
                let input = egui::TextEdit::singleline(&mut state.message_input)
                    .hint_text("Type a message...")
                    .desired_width(ui.available_width() - 70.0);
                let response = ui.add(input);

                let can_send = !state.message_input.trim().is_empty() && !log.is_sending();
                let send_btn = ui.add_enabled(
                    can_send,
                    egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                        .fill(if can_send { ACCENT } else { BG_SURFACE })
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(60.0, 0.0)),
                );

                let submitted = response.lost_focus()
                    && ui.input(|i| i.key_pressed(egui::Key::Enter))
                    && can_send;
                if send_btn.clicked() || submitted {
                    let text = state.message_input.trim().to_string();
                    state.message_input.clear();
                    action = Some(ChatAction::Send(text));
                    response.request_focus();
                }
            });
        });

    if !open {
        action = Some(ChatAction::Close);
    }
    action
}

fn render_entry(ui: &mut egui::Ui, entry: &MessageEntry) {
    let from_user = entry.is_from_user();
    let fill = if from_user { USER_BUBBLE } else { BOT_BUBBLE };
    let layout = if from_user {
        Layout::right_to_left(Align::TOP)
    } else {
        Layout::left_to_right(Align::TOP)
    };

    ui.with_layout(layout, |ui| {
        egui::Frame::default()
            .fill(fill)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(PANEL_PADDING)
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.75);
                match entry {
                    MessageEntry::PendingReply { .. } => {
                        ui.label(RichText::new("Typing...").color(TEXT_SECONDARY).italics());
                    }
                    MessageEntry::PendingEcho { content, .. } => {
                        ui.label(RichText::new(content).color(TEXT_PRIMARY));
                    }
                    MessageEntry::Persisted(message) => {
                        ui.label(RichText::new(&message.content).color(TEXT_PRIMARY));
                    }
                }
            });
    });
}
