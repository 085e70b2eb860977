//! Home panel — header, chat card grid, and the create-chat dialog.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};

use agentchat_core::chats::ChatList;
use agentchat_types::chat::Chat;
use agentchat_types::user::User;

use crate::format::format_timestamp;
use crate::state::UiState;
use crate::theme::*;

const CARD_WIDTH: f32 = 260.0;

/// What the app should dispatch after rendering the home panel.
#[derive(Debug, Clone, PartialEq)]
pub enum HomeAction {
    Logout,
    OpenChat(Chat),
    /// Create a chat from the dialog fields.
    SubmitCreate { name: String, description: String },
}

/// Render the home panel. Returns Some(action) on user interaction.
pub fn home_panel(
    ui: &mut egui::Ui,
    state: &mut UiState,
    user: &User,
    chats: &ChatList,
) -> Option<HomeAction> {
    let mut action = None;

    // ── Header ───────────────────────────────────────────────
    ui.horizontal(|ui| {
        ui.label(RichText::new("Agent Chat").strong().color(ACCENT).size(18.0));
        ui.separator();
        ui.label(RichText::new(&user.name).color(TEXT_SECONDARY));
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.button("Sign out").clicked() {
                action = Some(HomeAction::Logout);
            }
            if ui
                .add(
                    egui::Button::new(RichText::new("New chatbot").color(TEXT_PRIMARY))
                        .fill(ACCENT)
                        .corner_radius(PANEL_ROUNDING),
                )
                .clicked()
            {
                state.show_create_dialog = true;
            }
        });
    });
    ui.separator();

    // ── Chat grid ────────────────────────────────────────────
    if chats.is_loading() && chats.chats().is_empty() {
        ui.centered_and_justified(|ui| {
            ui.spinner();
        });
    } else if chats.chats().is_empty() {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("No chatbots yet. Create your first one.")
                    .color(TEXT_SECONDARY),
            );
        });
    } else {
        ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            let columns = (ui.available_width() / CARD_WIDTH).max(1.0) as usize;
            egui::Grid::new("chat_grid")
                .num_columns(columns)
                .spacing(Vec2::new(12.0, 12.0))
                .show(ui, |ui| {
                    for (i, chat) in chats.chats().iter().enumerate() {
                        if chat_card(ui, chat) {
                            action = Some(HomeAction::OpenChat(chat.clone()));
                        }
                        if (i + 1) % columns == 0 {
                            ui.end_row();
                        }
                    }
                });
        });
    }

    // ── Create dialog ────────────────────────────────────────
    if state.show_create_dialog {
        if let Some(create) = create_dialog(ui.ctx(), state, chats) {
            action = Some(create);
        }
    }

    action
}

/// A single chat card. Returns true when clicked.
fn chat_card(ui: &mut egui::Ui, chat: &Chat) -> bool {
    let mut clicked = false;
    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH - 24.0);
            ui.vertical(|ui| {
                ui.label(RichText::new(&chat.name).color(TEXT_PRIMARY).strong());
                ui.label(RichText::new(&chat.description).color(TEXT_SECONDARY).small());
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format_timestamp(&chat.created_at))
                        .color(TEXT_SECONDARY)
                        .small(),
                );
                ui.add_space(4.0);
                if ui
                    .add(
                        egui::Button::new(RichText::new("Open").color(TEXT_PRIMARY))
                            .fill(ACCENT)
                            .corner_radius(PANEL_ROUNDING),
                    )
                    .clicked()
                {
                    clicked = true;
                }
            });
        });
    clicked
}

fn create_dialog(
    ctx: &egui::Context,
    state: &mut UiState,
    chats: &ChatList,
) -> Option<HomeAction> {
    let mut action = None;
    let mut open = state.show_create_dialog;

    egui::Window::new("New chatbot")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| {
            ui.set_min_width(320.0);

            ui.label(RichText::new("Name").color(TEXT_SECONDARY).small());
            ui.add(
                egui::TextEdit::singleline(&mut state.create_name)
                    .hint_text("My assistant")
                    .desired_width(f32::INFINITY),
            );

            ui.label(RichText::new("Description").color(TEXT_SECONDARY).small());
            ui.add(
                egui::TextEdit::multiline(&mut state.create_description)
                    .hint_text("What is this bot for?")
                    .desired_rows(3)
                    .desired_width(f32::INFINITY),
            );

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let can_create =
                    !state.create_name.trim().is_empty() && !chats.is_loading();
                if ui
                    .add_enabled(
                        can_create,
                        egui::Button::new(RichText::new("Create").color(TEXT_PRIMARY))
                            .fill(if can_create { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING),
                    )
                    .clicked()
                {
                    action = Some(HomeAction::SubmitCreate {
                        name: state.create_name.trim().to_string(),
                        description: state.create_description.trim().to_string(),
                    });
                }
                if ui.button("Cancel").clicked() {
                    state.show_create_dialog = false;
                    state.create_name.clear();
                    state.create_description.clear();
                }
            });
        });

    if !open {
        state.show_create_dialog = false;
    }
    action
}
