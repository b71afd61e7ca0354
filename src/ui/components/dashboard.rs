// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Document dashboard: simulated uploads and deletions over the in-memory registry.

use chrono::Local;
use eframe::egui;

use crate::logic::scheduler::CancellationToken;
use crate::models::document::{DocumentRecord, DocumentRegistry, FileDescriptor};
use crate::models::session::Session;
use crate::utils::icon_for;

/// Dashboard state; lives exactly as long as the authenticated session.
#[derive(Debug, Default)]
pub struct DashboardModel {
    registry: DocumentRegistry,
    uploads_in_flight: usize,
    uploads: CancellationToken,
}

impl DashboardModel {
    pub fn registry(&self) -> &DocumentRegistry {
        &self.registry
    }

    /// True while at least one simulated upload is pending.
    pub fn is_uploading(&self) -> bool {
        self.uploads_in_flight > 0
    }

    /// Token attached to every upload timer of this dashboard.
    pub fn upload_token(&self) -> &CancellationToken {
        &self.uploads
    }

    /// Cancel pending uploads before the dashboard is dropped.
    pub fn close(&mut self) {
        if self.uploads_in_flight > 0 {
            tracing::debug!(pending = self.uploads_in_flight, "dashboard: cancelling uploads");
        }
        self.uploads.cancel();
        self.uploads_in_flight = 0;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DashboardMsg {
    RequestPickFile,
    FilePicked(FileDescriptor),
    PickCancelled,
    PickFailed(String),
    /// Simulated transfer delay elapsed.
    UploadFinished(FileDescriptor),
    Delete(String),
    Logout,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DashboardCommand {
    /// Open the native file dialog.
    PickFile,
    /// Deliver [`DashboardMsg::UploadFinished`] after the upload latency.
    SimulateUpload(FileDescriptor),
    /// Ask the root model to end the session.
    Logout,
}

/// User-facing feedback surfaced to the status bar or error modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardEvent {
    pub message: String,
    pub is_error: bool,
}

impl DashboardEvent {
    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }
}

/// Apply a message to the dashboard. Returns a feedback event when relevant.
pub fn update(
    model: &mut DashboardModel,
    msg: DashboardMsg,
    cmds: &mut Vec<DashboardCommand>,
) -> Option<DashboardEvent> {
    match msg {
        DashboardMsg::RequestPickFile => {
            cmds.push(DashboardCommand::PickFile);
            None
        }
        DashboardMsg::FilePicked(file) => {
            tracing::info!(name = %file.name, bytes = file.size_bytes, "dashboard: upload started");
            model.uploads_in_flight += 1;
            let message = format!("Uploading {}...", file.name);
            cmds.push(DashboardCommand::SimulateUpload(file));
            Some(DashboardEvent::info(message))
        }
        DashboardMsg::PickCancelled => None,
        DashboardMsg::PickFailed(err) => Some(DashboardEvent {
            message: format!("Could not read the selected file:\n\n{err}"),
            is_error: true,
        }),
        DashboardMsg::UploadFinished(file) => {
            model.uploads_in_flight = model.uploads_in_flight.saturating_sub(1);
            let record = model
                .registry
                .insert_upload(file, Local::now().date_naive());
            tracing::info!(id = %record.id, "dashboard: upload finished");
            Some(DashboardEvent::info(format!("Uploaded {}", record.name)))
        }
        DashboardMsg::Delete(id) => model
            .registry
            .delete(&id)
            .then(|| DashboardEvent::info("Document deleted")),
        DashboardMsg::Logout => {
            cmds.push(DashboardCommand::Logout);
            None
        }
    }
}

/// Render the dashboard for `session` and return any messages triggered by user interaction.
pub fn view(ui: &mut egui::Ui, session: &Session, model: &DashboardModel) -> Vec<DashboardMsg> {
    let mut msgs = Vec::new();

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.heading(format!("Welcome, {}", session.greeting_name()));
            ui.label(
                egui::RichText::new(format!("Aadhar: {}", session.identifier))
                    .color(egui::Color32::from_gray(110)),
            );
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .button(format!("{} Logout", egui_phosphor::regular::SIGN_OUT))
                .clicked()
            {
                msgs.push(DashboardMsg::Logout);
            }
        });
    });
    ui.add_space(12.0);

    render_upload_area(ui, model, &mut msgs);
    ui.add_space(12.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.strong("Your Documents");
        ui.separator();
        if model.registry.is_empty() {
            render_empty(ui);
        } else {
            render_document_list(ui, model.registry.list(), &mut msgs);
        }
    });

    msgs
}

fn render_upload_area(ui: &mut egui::Ui, model: &DashboardModel, msgs: &mut Vec<DashboardMsg>) {
    egui::Frame::group(ui.style())
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(egui_phosphor::regular::UPLOAD_SIMPLE)
                        .size(36.0)
                        .color(egui::Color32::from_gray(150)),
                );
                if ui.button("Upload Documents").clicked() {
                    msgs.push(DashboardMsg::RequestPickFile);
                }
                ui.label(
                    egui::RichText::new("Supported formats: PDF, DOC, DOCX, JPG, PNG")
                        .small()
                        .color(egui::Color32::from_gray(130)),
                );
                if model.is_uploading() {
                    ui.add_space(6.0);
                    ui.horizontal(|ui| {
                        ui.add(egui::Spinner::new().size(14.0));
                        ui.label(format!("Uploading ({})…", model.uploads_in_flight));
                    });
                }
            });
        });
}

fn render_empty(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(12.0);
        ui.label(
            egui::RichText::new(egui_phosphor::regular::FILE)
                .size(36.0)
                .color(egui::Color32::from_gray(150)),
        );
        ui.label(egui::RichText::new("No documents uploaded yet").strong());
        ui.label(
            egui::RichText::new("Upload your first document to get started")
                .small()
                .color(egui::Color32::from_gray(130)),
        );
        ui.add_space(12.0);
    });
}

fn render_document_list(
    ui: &mut egui::Ui,
    documents: &[DocumentRecord],
    msgs: &mut Vec<DashboardMsg>,
) {
    for (index, doc) in documents.iter().enumerate() {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(icon_for(&doc.mime_type, &doc.name))
                    .size(24.0)
                    .color(egui::Color32::from_rgb(59, 130, 246)),
            );
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&doc.name).strong())
                    .on_hover_text(format!("{} | {} bytes", doc.mime_type, doc.size_bytes));
                ui.label(
                    egui::RichText::new(format!(
                        "{} • Uploaded on {}",
                        doc.size_label,
                        doc.uploaded_on_label()
                    ))
                    .small()
                    .color(egui::Color32::from_gray(110)),
                );
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(egui::RichText::new(egui_phosphor::regular::TRASH_SIMPLE))
                    .on_hover_text("Delete")
                    .clicked()
                {
                    msgs.push(DashboardMsg::Delete(doc.id.clone()));
                }
            });
        });
        if index + 1 < documents.len() {
            ui.separator();
        }
    }
}
