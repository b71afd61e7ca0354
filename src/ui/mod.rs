// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for the citizen portal.
//! Handles layout, screen selection, deferred-message polling, and the worker pool.

pub mod components;

use std::time::Instant;

use chrono::{Datelike, Local};
use eframe::egui;

use crate::config::Timings;
use crate::logic::scheduler::Scheduler;
use crate::mvu::{self, AppModel, Command, IoCommand, Msg, Screen};
use crate::ui::components::{dashboard, login, signup};

/// Stateful egui application driving the portal screens.
pub struct PortalApp {
    model: AppModel,
    inbox: Vec<Msg>,
    scheduler: Scheduler<Msg>,
    cmd_tx: crossbeam_channel::Sender<IoCommand>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl PortalApp {
    pub fn new(timings: Timings) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<IoCommand>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        // Native dialogs block, so keep them off the UI thread.
        for _ in 0..2 {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    tracing::debug!(?cmd, "worker: running command");
                    let msg = mvu::run_io(cmd);
                    let _ = msg_tx.send(msg);
                }
            });
        }

        Self {
            model: AppModel::new(timings),
            inbox: Vec::new(),
            scheduler: Scheduler::default(),
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for PortalApp {
    /// Required by eframe 0.34; all rendering happens in `update`, which
    /// eframe still calls immediately before this method each frame.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    /// Drives a single UI frame.
    ///
    /// Collects worker results and due deferred messages into the inbox,
    /// applies them in arrival order, dispatches the resulting commands, then
    /// renders the header, footer, error modal, and the screen selected by the
    /// session state. A repaint is requested for the next scheduler deadline so
    /// timers fire without user input.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        let now = Instant::now();
        self.inbox.extend(self.scheduler.take_due(now));
        self.process_inbox(now);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            self.render_header(ui);
        });

        egui::TopBottomPanel::bottom("footer")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_footer(ui);
            });

        self.render_error_modal(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(16.0);
                self.render_screen(ui);
                ui.add_space(16.0);
            });
        });

        if let Some(deadline) = self.scheduler.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }
    }
}

impl PortalApp {
    /// Apply queued messages until no new ones are produced.
    fn process_inbox(&mut self, now: Instant) {
        while !self.inbox.is_empty() {
            let msgs = std::mem::take(&mut self.inbox);
            for msg in msgs {
                let mut commands = Vec::new();
                mvu::update(&mut self.model, msg, &mut commands);
                self.dispatch(commands, now);
            }
        }
    }

    fn dispatch(&mut self, commands: Vec<Command>, now: Instant) {
        for cmd in commands {
            match cmd {
                Command::Defer(d) => self.scheduler.schedule(now, d.delay, d.token, d.msg),
                Command::Io(io) => {
                    if self.cmd_tx.send(io).is_ok() {
                        self.model.pending_commands += 1;
                    } else {
                        tracing::error!("worker pool is gone; command dropped");
                    }
                }
            }
        }
    }

    fn render_screen(&mut self, ui: &mut egui::Ui) {
        match self.model.screen() {
            Screen::Login => {
                let msgs = login::view(ui, &self.model.login);
                self.inbox.extend(msgs.into_iter().map(Msg::Login));
            }
            Screen::Signup => {
                let msgs = signup::view(ui, &self.model.signup);
                self.inbox.extend(msgs.into_iter().map(Msg::Signup));
            }
            Screen::Dashboard => match self.model.dashboard_view() {
                Ok((session, dash)) => {
                    let msgs = dashboard::view(ui, session, dash);
                    self.inbox.extend(msgs.into_iter().map(Msg::Dashboard));
                }
                Err(err) => {
                    ui.label("Your session is not available.");
                    if self.model.error.is_none() {
                        self.inbox
                            .push(Msg::ReportError(format!("Cannot open dashboard: {err}")));
                    }
                }
            },
        }
    }

    fn render_header(&self, ui: &mut egui::Ui) {
        let title = match self.model.screen() {
            Screen::Dashboard => "Document Management System",
            Screen::Login | Screen::Signup => "e-Governance Portal",
        };
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(egui_phosphor::regular::SHIELD)
                    .size(28.0)
                    .color(egui::Color32::from_rgb(249, 115, 22)),
            );
            ui.vertical(|ui| {
                ui.heading(title);
                ui.label(
                    egui::RichText::new("Digital Services Portal")
                        .small()
                        .color(egui::Color32::from_gray(110)),
                );
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                egui::widgets::global_theme_preference_switch(ui);
            });
        });
        ui.add_space(4.0);
    }

    /// Status line with background-work spinner plus the copyright notice.
    fn render_footer(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if let Some(text) = &self.model.status {
                ui.label(egui::RichText::new(text).color(egui::Color32::from_gray(68)));
            }
            if self.model.pending_commands > 0 {
                ui.add(egui::Spinner::new().size(14.0)).on_hover_text(format!(
                    "{} task(s) running in background",
                    self.model.pending_commands
                ));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "© {} Government of India. All rights reserved.",
                        Local::now().year()
                    ))
                    .small()
                    .color(egui::Color32::from_gray(110)),
                );
            });
        });
    }

    /// Render a simple modal window for error messages.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }
}
