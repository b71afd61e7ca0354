// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Building blocks shared by the login and registration forms.

use std::collections::BTreeMap;

use eframe::egui;

/// Lifecycle of a form submission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormPhase {
    /// Accepting input; also the state after a rejected validation.
    #[default]
    Editing,
    /// Waiting for the simulated backend; further submits are ignored.
    Submitting,
    Succeeded,
    Failed,
}

impl FormPhase {
    pub fn is_submitting(self) -> bool {
        self == FormPhase::Submitting
    }
}

/// Inline validation messages keyed by field.
pub type FieldErrors<F> = BTreeMap<F, &'static str>;

/// Static description of a text input.
pub struct FieldSpec {
    pub label: &'static str,
    pub hint: &'static str,
    pub icon: &'static str,
    pub password: bool,
    pub max_len: Option<usize>,
}

/// Render a labelled single-line input with its inline error.
///
/// Returns the edited text when the user changed it this frame.
pub fn text_field(
    ui: &mut egui::Ui,
    spec: &FieldSpec,
    value: &str,
    error: Option<&str>,
) -> Option<String> {
    let mut changed = None;

    ui.label(spec.label);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(spec.icon).color(egui::Color32::from_gray(140)));
        let mut buffer = value.to_string();
        let mut edit = egui::TextEdit::singleline(&mut buffer)
            .hint_text(spec.hint)
            .password(spec.password)
            .desired_width(f32::INFINITY);
        if let Some(max) = spec.max_len {
            edit = edit.char_limit(max);
        }
        if ui.add(edit).changed() {
            changed = Some(buffer);
        }
    });
    field_error(ui, error);
    ui.add_space(6.0);

    changed
}

/// Small red message under a field.
pub fn field_error(ui: &mut egui::Ui, error: Option<&str>) {
    if let Some(message) = error {
        ui.label(
            egui::RichText::new(message)
                .small()
                .color(egui::Color32::from_rgb(200, 40, 40)),
        );
    }
}

/// Coloured banner used for submission results.
pub fn banner(ui: &mut egui::Ui, icon: &str, message: &str, is_error: bool) {
    let (fill, text) = if is_error {
        (
            egui::Color32::from_rgb(254, 242, 242),
            egui::Color32::from_rgb(153, 27, 27),
        )
    } else {
        (
            egui::Color32::from_rgb(240, 253, 244),
            egui::Color32::from_rgb(22, 101, 52),
        )
    };
    egui::Frame::new()
        .fill(fill)
        .corner_radius(4.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(format!("{icon} {message}")).color(text));
        });
    ui.add_space(8.0);
}

/// Full-width submit button that turns into a spinner while submitting.
///
/// Returns true when clicked and not already submitting.
pub fn submit_button(ui: &mut egui::Ui, label: &str, phase: FormPhase) -> bool {
    if phase.is_submitting() {
        ui.horizontal(|ui| {
            ui.add(egui::Spinner::new().size(16.0));
            ui.label("Please wait…");
        });
        return false;
    }
    ui.add_sized(
        [ui.available_width(), 28.0],
        egui::Button::new(egui::RichText::new(label).strong()),
    )
    .clicked()
}

/// Card with a coloured title strip, used by both auth screens.
pub fn card<R>(
    ui: &mut egui::Ui,
    title: &str,
    subtitle: &str,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    let width = ui.available_width().min(420.0);
    ui.vertical_centered(|ui| {
        ui.set_max_width(width);
        egui::Frame::group(ui.style())
            .inner_margin(0.0)
            .show(ui, |ui| {
                ui.set_width(width);
                egui::Frame::new()
                    .fill(egui::Color32::from_rgb(30, 64, 175))
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.vertical_centered(|ui| {
                            ui.label(
                                egui::RichText::new(title)
                                    .heading()
                                    .strong()
                                    .color(egui::Color32::WHITE),
                            );
                            ui.label(
                                egui::RichText::new(subtitle)
                                    .small()
                                    .color(egui::Color32::from_rgb(219, 234, 254)),
                            );
                        });
                    });
                egui::Frame::new()
                    .inner_margin(16.0)
                    .show(ui, |ui| {
                        ui.with_layout(egui::Layout::top_down(egui::Align::Min), add_contents)
                            .inner
                    })
                    .inner
            })
            .inner
    })
    .inner
}
