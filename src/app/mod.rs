// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application entry point wiring egui/eframe to launch the portal UI.

use eframe::egui;
use egui_phosphor::Variant;

use crate::config::PortalConfig;
use crate::ui::PortalApp;

/// Bootstrap the desktop application and run the main egui event loop.
pub fn run(config: &PortalConfig) -> eframe::Result<()> {
    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("e-Governance Portal")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([480.0, 560.0]),
        ..Default::default()
    };

    let timings = config.timings();
    tracing::info!(?timings, "starting portal");

    eframe::run_native(
        "Citizen Portal",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(PortalApp::new(timings)))
        }),
    )
}
