// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Citizen registration form as an MVU component.

use chrono::{Local, NaiveDate};
use eframe::egui;
use egui_extras::DatePickerButton;

use crate::models::validation::{
    BIRTH_DATE_FORMAT, IDENTIFIER_LEN, birth_date_is_valid, display_name_is_valid,
    identifier_is_valid, parse_birth_date, passphrase_is_valid,
};
use crate::ui::components::form::{self, FieldErrors, FieldSpec, FormPhase};
use crate::ui::components::login::{
    IDENTIFIER_INVALID, IDENTIFIER_REQUIRED, PASSWORD_INVALID, PASSWORD_REQUIRED,
};

pub const BIRTH_DATE_REQUIRED: &str = "Date of birth is required";
pub const BIRTH_DATE_INVALID: &str = "You must be at least 18 years old";
pub const USERNAME_REQUIRED: &str = "Username is required";
pub const USERNAME_INVALID: &str =
    "Username must be 3-30 characters and can contain letters, numbers, and underscores";
pub const CONFIRM_REQUIRED: &str = "Please confirm your password";
pub const CONFIRM_MISMATCH: &str = "Passwords do not match";
pub const TERMS_REQUIRED: &str = "You must accept the terms of service";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SignupField {
    Identifier,
    BirthDate,
    Username,
    Password,
    ConfirmPassword,
    Terms,
}

/// Raw registration input, validated as a whole on submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub identifier: String,
    pub birth_date: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub terms_accepted: bool,
}

/// Account data captured when the form was submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Registration {
    identifier: String,
    username: String,
}

/// Form state for the registration screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupModel {
    form: SignupForm,
    errors: FieldErrors<SignupField>,
    phase: FormPhase,
    pending: Option<Registration>,
}

impl SignupModel {
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    pub fn error(&self, field: SignupField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignupMsg {
    IdentifierChanged(String),
    BirthDateChanged(String),
    BirthDatePicked(NaiveDate),
    UsernameChanged(String),
    PasswordChanged(String),
    ConfirmPasswordChanged(String),
    TermsToggled(bool),
    Submit,
    /// Simulated backend latency elapsed.
    RegistrationFinished,
    GoToLogin,
}

/// Side effects requested by the registration form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignupCommand {
    /// Deliver [`SignupMsg::RegistrationFinished`] after the signup latency.
    AwaitRegistration,
    /// Return to the login screen after the redirect delay.
    ScheduleRedirect,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignupOutcome {
    Registered { identifier: String, username: String },
    GoToLogin,
}

/// Apply a message to the registration form.
pub fn update(
    model: &mut SignupModel,
    msg: SignupMsg,
    cmds: &mut Vec<SignupCommand>,
) -> Option<SignupOutcome> {
    match msg {
        SignupMsg::IdentifierChanged(text) => {
            edit(model, SignupField::Identifier, |f| f.identifier = text)
        }
        SignupMsg::BirthDateChanged(text) => {
            edit(model, SignupField::BirthDate, |f| f.birth_date = text)
        }
        SignupMsg::BirthDatePicked(date) => edit(model, SignupField::BirthDate, |f| {
            f.birth_date = date.format(BIRTH_DATE_FORMAT).to_string()
        }),
        SignupMsg::UsernameChanged(text) => {
            edit(model, SignupField::Username, |f| f.username = text)
        }
        SignupMsg::PasswordChanged(text) => {
            edit(model, SignupField::Password, |f| f.password = text)
        }
        SignupMsg::ConfirmPasswordChanged(text) => {
            edit(model, SignupField::ConfirmPassword, |f| f.confirm_password = text)
        }
        SignupMsg::TermsToggled(on) => edit(model, SignupField::Terms, |f| f.terms_accepted = on),
        SignupMsg::Submit => {
            submit(model, cmds);
            None
        }
        SignupMsg::RegistrationFinished => {
            let Some(registration) = model.pending.take() else {
                tracing::warn!("signup: registration finished without a pending request");
                return None;
            };
            model.phase = FormPhase::Succeeded;
            cmds.push(SignupCommand::ScheduleRedirect);
            Some(SignupOutcome::Registered {
                identifier: registration.identifier,
                username: registration.username,
            })
        }
        SignupMsg::GoToLogin => {
            if model.phase.is_submitting() {
                return None;
            }
            Some(SignupOutcome::GoToLogin)
        }
    }
}

fn edit(
    model: &mut SignupModel,
    field: SignupField,
    apply: impl FnOnce(&mut SignupForm),
) -> Option<SignupOutcome> {
    apply(&mut model.form);
    model.errors.remove(&field);
    None
}

fn submit(model: &mut SignupModel, cmds: &mut Vec<SignupCommand>) {
    if model.phase.is_submitting() {
        tracing::debug!("signup: submit ignored while registering");
        return;
    }

    model.phase = FormPhase::Editing;
    model.errors = validate(&model.form);
    if !model.errors.is_empty() {
        tracing::debug!(fields = model.errors.len(), "signup: validation failed");
        return;
    }

    model.phase = FormPhase::Submitting;
    model.pending = Some(Registration {
        identifier: model.form.identifier.clone(),
        username: model.form.username.clone(),
    });
    cmds.push(SignupCommand::AwaitRegistration);
}

/// Validate every registration field and collect per-field messages.
pub fn validate(form: &SignupForm) -> FieldErrors<SignupField> {
    let mut errors = FieldErrors::new();

    if form.identifier.is_empty() {
        errors.insert(SignupField::Identifier, IDENTIFIER_REQUIRED);
    } else if !identifier_is_valid(&form.identifier) {
        errors.insert(SignupField::Identifier, IDENTIFIER_INVALID);
    }

    if form.birth_date.is_empty() {
        errors.insert(SignupField::BirthDate, BIRTH_DATE_REQUIRED);
    } else if !birth_date_is_valid(&form.birth_date) {
        errors.insert(SignupField::BirthDate, BIRTH_DATE_INVALID);
    }

    if form.username.is_empty() {
        errors.insert(SignupField::Username, USERNAME_REQUIRED);
    } else if !display_name_is_valid(&form.username) {
        errors.insert(SignupField::Username, USERNAME_INVALID);
    }

    if form.password.is_empty() {
        errors.insert(SignupField::Password, PASSWORD_REQUIRED);
    } else if !passphrase_is_valid(&form.password) {
        errors.insert(SignupField::Password, PASSWORD_INVALID);
    }

    if form.confirm_password.is_empty() {
        errors.insert(SignupField::ConfirmPassword, CONFIRM_REQUIRED);
    } else if form.password != form.confirm_password {
        errors.insert(SignupField::ConfirmPassword, CONFIRM_MISMATCH);
    }

    if !form.terms_accepted {
        errors.insert(SignupField::Terms, TERMS_REQUIRED);
    }

    errors
}

/// Render the registration card and return any messages triggered by user interaction.
pub fn view(ui: &mut egui::Ui, model: &SignupModel) -> Vec<SignupMsg> {
    let mut msgs = Vec::new();

    form::card(
        ui,
        "Citizen Registration",
        "Create your Government Services Account",
        |ui| {
            if model.phase == FormPhase::Succeeded {
                render_complete(ui, &mut msgs);
            } else {
                render_fields(ui, model, &mut msgs);
            }
        },
    );

    msgs
}

fn render_complete(ui: &mut egui::Ui, msgs: &mut Vec<SignupMsg>) {
    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new(egui_phosphor::regular::CHECK_CIRCLE)
                .size(32.0)
                .color(egui::Color32::from_rgb(22, 163, 74)),
        );
        ui.heading("Registration Successful!");
        ui.label(
            "Your account has been created successfully. \
             You will be redirected to the login page shortly.",
        );
        ui.add_space(8.0);
        if ui.button("Proceed to Login").clicked() {
            msgs.push(SignupMsg::GoToLogin);
        }
    });
}

fn render_fields(ui: &mut egui::Ui, model: &SignupModel, msgs: &mut Vec<SignupMsg>) {
    let f = &model.form;

    let identifier = FieldSpec {
        label: "Aadhar Number",
        hint: "Enter your 12-digit Aadhar number",
        icon: egui_phosphor::regular::FINGERPRINT,
        password: false,
        max_len: Some(IDENTIFIER_LEN),
    };
    if let Some(text) = form::text_field(
        ui,
        &identifier,
        &f.identifier,
        model.error(SignupField::Identifier),
    ) {
        msgs.push(SignupMsg::IdentifierChanged(text));
    }

    render_birth_date(ui, model, msgs);

    let username = FieldSpec {
        label: "Username",
        hint: "Create a username",
        icon: egui_phosphor::regular::USER,
        password: false,
        max_len: None,
    };
    if let Some(text) =
        form::text_field(ui, &username, &f.username, model.error(SignupField::Username))
    {
        msgs.push(SignupMsg::UsernameChanged(text));
    }

    let password = FieldSpec {
        label: "Password",
        hint: "Create a password",
        icon: egui_phosphor::regular::LOCK,
        password: true,
        max_len: None,
    };
    if let Some(text) =
        form::text_field(ui, &password, &f.password, model.error(SignupField::Password))
    {
        msgs.push(SignupMsg::PasswordChanged(text));
    }

    let confirm = FieldSpec {
        label: "Confirm Password",
        hint: "Confirm your password",
        icon: egui_phosphor::regular::LOCK,
        password: true,
        max_len: None,
    };
    if let Some(text) = form::text_field(
        ui,
        &confirm,
        &f.confirm_password,
        model.error(SignupField::ConfirmPassword),
    ) {
        msgs.push(SignupMsg::ConfirmPasswordChanged(text));
    }

    let mut accepted = f.terms_accepted;
    if ui
        .checkbox(&mut accepted, "I agree to the Terms of Service and Privacy Policy")
        .changed()
    {
        msgs.push(SignupMsg::TermsToggled(accepted));
    }
    form::field_error(ui, model.error(SignupField::Terms));

    ui.add_space(8.0);
    if form::submit_button(ui, "Register", model.phase) {
        msgs.push(SignupMsg::Submit);
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label("Already have an account?");
        if ui
            .add_enabled(!model.phase.is_submitting(), egui::Link::new("Login Here"))
            .clicked()
        {
            msgs.push(SignupMsg::GoToLogin);
        }
    });
}

/// Text input for `YYYY-MM-DD` plus a calendar button writing the same value.
fn render_birth_date(ui: &mut egui::Ui, model: &SignupModel, msgs: &mut Vec<SignupMsg>) {
    ui.label("Date of Birth");
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(egui_phosphor::regular::CALENDAR)
                .color(egui::Color32::from_gray(140)),
        );
        let mut text = model.form.birth_date.clone();
        if ui
            .add(
                egui::TextEdit::singleline(&mut text)
                    .hint_text("YYYY-MM-DD")
                    .desired_width(120.0),
            )
            .changed()
        {
            msgs.push(SignupMsg::BirthDateChanged(text));
        }

        let mut picked =
            parse_birth_date(&model.form.birth_date).unwrap_or_else(|| Local::now().date_naive());
        if ui
            .add(
                DatePickerButton::new(&mut picked)
                    .id_salt("signup_birth_date")
                    .show_icon(true),
            )
            .changed()
        {
            msgs.push(SignupMsg::BirthDatePicked(picked));
        }
    });
    form::field_error(ui, model.error(SignupField::BirthDate));
    ui.add_space(6.0);
}
