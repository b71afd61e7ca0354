// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

mod app;
mod config;
mod logic;
mod models;
mod mvu;
mod ui;
mod utils;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::PortalConfig;

fn main() -> eframe::Result<()> {
    let config = PortalConfig::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    app::run(&config)
}
