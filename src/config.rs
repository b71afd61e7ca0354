// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Command-line configuration: simulated latencies and log filtering.

use std::time::Duration;

use clap::Parser;

/// Options accepted by the `citizen-portal` binary.
#[derive(Parser, Debug, Clone)]
#[command(name = "citizen-portal", version, about)]
pub struct PortalConfig {
    /// Simulated delay before a login attempt is answered.
    #[arg(long, default_value_t = 1500)]
    pub login_latency_ms: u64,
    /// Simulated delay before a registration completes.
    #[arg(long, default_value_t = 1500)]
    pub signup_latency_ms: u64,
    /// Delay before a completed registration returns to the login screen.
    #[arg(long, default_value_t = 3000)]
    pub redirect_delay_ms: u64,
    /// Simulated delay before an upload shows up in the document list.
    #[arg(long, default_value_t = 1500)]
    pub upload_latency_ms: u64,
    /// Tracing filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info")]
    pub log_filter: String,
}

impl PortalConfig {
    pub fn timings(&self) -> Timings {
        Timings {
            login_latency: Duration::from_millis(self.login_latency_ms),
            signup_latency: Duration::from_millis(self.signup_latency_ms),
            redirect_delay: Duration::from_millis(self.redirect_delay_ms),
            upload_latency: Duration::from_millis(self.upload_latency_ms),
        }
    }
}

/// Delays applied by the MVU kernel when scheduling deferred tasks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    pub login_latency: Duration,
    pub signup_latency: Duration,
    pub redirect_delay: Duration,
    pub upload_latency: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            login_latency: Duration::from_millis(1500),
            signup_latency: Duration::from_millis(1500),
            redirect_delay: Duration::from_millis(3000),
            upload_latency: Duration::from_millis(1500),
        }
    }
}
