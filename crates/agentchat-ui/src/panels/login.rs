//! Login panel — email entry followed by OTP verification.

use egui::{self, Align, Layout, RichText, Vec2};

use crate::state::{LoginStep, UiState};
use crate::theme::*;

/// What the app should dispatch after rendering the login panel.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginAction {
    /// Ask the backend to email a code to `UiState::login.email`.
    SubmitEmail,
    /// Exchange the entered code for a session.
    SubmitOtp,
    /// Re-issue the email submission without touching the code field.
    ResendCode,
}

/// Render the login panel. Returns Some(action) when the user submits.
pub fn login_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<LoginAction> {
    let mut action = None;

    ui.with_layout(Layout::top_down(Align::Center), |ui| {
        ui.add_space(ui.available_height() * 0.2);

        egui::Frame::default()
            .fill(BG_SECONDARY)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_max_width(360.0);
                match state.login.step {
                    LoginStep::EnteringEmail => action = email_step(ui, state),
                    LoginStep::CodeSent => action = otp_step(ui, state),
                }

                if let Some(error) = &state.login.error {
                    ui.add_space(8.0);
                    ui.label(RichText::new(error).color(ERROR).small());
                }
            });
    });

    action
}

fn email_step(ui: &mut egui::Ui, state: &mut UiState) -> Option<LoginAction> {
    let mut action = None;
    let flow = &mut state.login;

    ui.heading(RichText::new("Sign in").color(TEXT_PRIMARY).strong());
    ui.label(
        RichText::new("Enter your email to receive a verification code")
            .color(TEXT_SECONDARY)
            .small(),
    );
    ui.add_space(12.0);

    ui.label(RichText::new("Email").color(TEXT_SECONDARY).small());
    let input = egui::TextEdit::singleline(&mut flow.email)
        .hint_text("you@example.com")
        .desired_width(f32::INFINITY)
        .interactive(!flow.is_busy);
    let response = ui.add(input);

    ui.add_space(12.0);

    let can_submit = flow.email_ready() && !flow.is_busy;
    let label = if flow.is_busy { "Sending..." } else { "Send code" };
    let clicked = ui
        .add_enabled(
            can_submit,
            egui::Button::new(RichText::new(label).color(TEXT_PRIMARY))
                .fill(if can_submit { ACCENT } else { BG_SURFACE })
                .corner_radius(PANEL_ROUNDING)
                .min_size(Vec2::new(ui.available_width(), 32.0)),
        )
        .clicked();

    let submitted =
        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) && can_submit;
    if clicked || submitted {
        flow.is_busy = true;
        flow.error = None;
        action = Some(LoginAction::SubmitEmail);
    }

    action
}

fn otp_step(ui: &mut egui::Ui, state: &mut UiState) -> Option<LoginAction> {
    let mut action = None;
    let flow = &mut state.login;

    ui.heading(RichText::new("Verify code").color(TEXT_PRIMARY).strong());
    ui.label(
        RichText::new(format!("Enter the 6-digit code sent to {}", flow.email))
            .color(TEXT_SECONDARY)
            .small(),
    );
    ui.add_space(12.0);

    ui.label(RichText::new("Verification code").color(TEXT_SECONDARY).small());
    let input = egui::TextEdit::singleline(&mut flow.otp)
        .hint_text("123456")
        .char_limit(6)
        .desired_width(f32::INFINITY)
        .font(egui::FontId::monospace(20.0))
        .interactive(!flow.is_busy);
    let response = ui.add(input);
    if response.changed() {
        flow.otp.retain(|c| c.is_ascii_digit());
        flow.otp.truncate(6);
    }

    ui.add_space(12.0);

    let can_submit = flow.otp_ready() && !flow.is_busy;
    let label = if flow.is_busy { "Verifying..." } else { "Verify code" };
    let clicked = ui
        .add_enabled(
            can_submit,
            egui::Button::new(RichText::new(label).color(TEXT_PRIMARY))
                .fill(if can_submit { ACCENT } else { BG_SURFACE })
                .corner_radius(PANEL_ROUNDING)
                .min_size(Vec2::new(ui.available_width(), 32.0)),
        )
        .clicked();

    let submitted =
        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) && can_submit;
    if clicked || submitted {
        flow.is_busy = true;
        flow.error = None;
        action = Some(LoginAction::SubmitOtp);
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new("Didn't get the code?").color(TEXT_SECONDARY).small());
        if ui
            .add_enabled(!flow.is_busy, egui::Button::new(RichText::new("Resend code").small()))
            .clicked()
        {
            flow.is_busy = true;
            flow.error = None;
            action = Some(LoginAction::ResendCode);
        }
    });

    if ui
        .add_enabled(!flow.is_busy, egui::Button::new(RichText::new("Back").small()))
        .clicked()
    {
        flow.back_to_email();
    }

    action
}
