// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Citizen login form as an MVU component.

use eframe::egui;

use crate::logic::auth::verify_credentials;
use crate::models::validation::{IDENTIFIER_LEN, identifier_is_valid, passphrase_is_valid};
use crate::ui::components::form::{self, FieldErrors, FieldSpec, FormPhase};

pub const IDENTIFIER_REQUIRED: &str = "Aadhar number is required";
pub const IDENTIFIER_INVALID: &str = "Please enter a valid 12-digit Aadhar number";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_INVALID: &str =
    "Password must be at least 8 characters with letters and numbers";
pub const LOGIN_REJECTED: &str = "Invalid Aadhar number or password. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoginField {
    Identifier,
    Password,
}

/// Values captured when the form was submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
struct LoginAttempt {
    identifier: String,
    password: String,
}

/// Form state for the login screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginModel {
    identifier: String,
    password: String,
    errors: FieldErrors<LoginField>,
    phase: FormPhase,
    attempt: Option<LoginAttempt>,
}

impl LoginModel {
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn error(&self, field: LoginField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginMsg {
    IdentifierChanged(String),
    PasswordChanged(String),
    Submit,
    /// Simulated backend latency elapsed.
    VerificationFinished,
    GoToSignup,
}

/// Side effects requested by the login form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginCommand {
    /// Deliver [`LoginMsg::VerificationFinished`] after the login latency.
    AwaitVerification,
}

/// Results the root model must act on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated { identifier: String },
    Rejected,
    GoToSignup,
}

/// Apply a message to the login form.
pub fn update(
    model: &mut LoginModel,
    msg: LoginMsg,
    cmds: &mut Vec<LoginCommand>,
) -> Option<LoginOutcome> {
    match msg {
        LoginMsg::IdentifierChanged(text) => {
            model.identifier = text;
            model.errors.remove(&LoginField::Identifier);
            None
        }
        LoginMsg::PasswordChanged(text) => {
            model.password = text;
            model.errors.remove(&LoginField::Password);
            None
        }
        LoginMsg::Submit => {
            submit(model, cmds);
            None
        }
        LoginMsg::VerificationFinished => finish_verification(model),
        LoginMsg::GoToSignup => {
            if model.phase.is_submitting() {
                return None;
            }
            Some(LoginOutcome::GoToSignup)
        }
    }
}

fn submit(model: &mut LoginModel, cmds: &mut Vec<LoginCommand>) {
    if model.phase.is_submitting() {
        tracing::debug!("login: submit ignored while verifying");
        return;
    }

    model.phase = FormPhase::Editing;
    model.errors = validate(&model.identifier, &model.password);
    if !model.errors.is_empty() {
        tracing::debug!(fields = model.errors.len(), "login: validation failed");
        return;
    }

    model.phase = FormPhase::Submitting;
    model.attempt = Some(LoginAttempt {
        identifier: model.identifier.clone(),
        password: model.password.clone(),
    });
    cmds.push(LoginCommand::AwaitVerification);
}

fn finish_verification(model: &mut LoginModel) -> Option<LoginOutcome> {
    let Some(attempt) = model.attempt.take() else {
        tracing::warn!("login: verification finished without a pending attempt");
        return None;
    };

    if verify_credentials(&attempt.identifier, &attempt.password) {
        *model = LoginModel::default();
        Some(LoginOutcome::Authenticated {
            identifier: attempt.identifier,
        })
    } else {
        model.phase = FormPhase::Failed;
        Some(LoginOutcome::Rejected)
    }
}

/// Validate both login fields and collect per-field messages.
pub fn validate(identifier: &str, password: &str) -> FieldErrors<LoginField> {
    let mut errors = FieldErrors::new();

    if identifier.is_empty() {
        errors.insert(LoginField::Identifier, IDENTIFIER_REQUIRED);
    } else if !identifier_is_valid(identifier) {
        errors.insert(LoginField::Identifier, IDENTIFIER_INVALID);
    }

    if password.is_empty() {
        errors.insert(LoginField::Password, PASSWORD_REQUIRED);
    } else if !passphrase_is_valid(password) {
        errors.insert(LoginField::Password, PASSWORD_INVALID);
    }

    errors
}

/// Render the login card and return any messages triggered by user interaction.
pub fn view(ui: &mut egui::Ui, model: &LoginModel) -> Vec<LoginMsg> {
    let mut msgs = Vec::new();

    form::card(ui, "Citizen Login", "Access Government Services", |ui| {
        if model.phase == FormPhase::Failed {
            form::banner(ui, egui_phosphor::regular::WARNING_CIRCLE, LOGIN_REJECTED, true);
        }

        let identifier_spec = FieldSpec {
            label: "Aadhar Number",
            hint: "Enter your 12-digit Aadhar number",
            icon: egui_phosphor::regular::FINGERPRINT,
            password: false,
            max_len: Some(IDENTIFIER_LEN),
        };
        if let Some(text) = form::text_field(
            ui,
            &identifier_spec,
            &model.identifier,
            model.error(LoginField::Identifier),
        ) {
            msgs.push(LoginMsg::IdentifierChanged(text));
        }

        let password_spec = FieldSpec {
            label: "Password",
            hint: "Enter your password",
            icon: egui_phosphor::regular::LOCK,
            password: true,
            max_len: None,
        };
        if let Some(text) = form::text_field(
            ui,
            &password_spec,
            &model.password,
            model.error(LoginField::Password),
        ) {
            msgs.push(LoginMsg::PasswordChanged(text));
        }

        ui.add_space(8.0);
        if form::submit_button(ui, "Login", model.phase) {
            msgs.push(LoginMsg::Submit);
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Don't have an account?");
            if ui
                .add_enabled(!model.phase.is_submitting(), egui::Link::new("Register Now"))
                .clicked()
            {
                msgs.push(LoginMsg::GoToSignup);
            }
        });
    });

    msgs
}
