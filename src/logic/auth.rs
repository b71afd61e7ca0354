// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Demo credential check standing in for an identity provider.

/// Aadhar number of the single demo account.
pub const DEMO_IDENTIFIER: &str = "123456789012";

/// Password of the single demo account.
pub const DEMO_PASSWORD: &str = "Password123";

/// Return true when both values match the demo account exactly.
pub fn verify_credentials(identifier: &str, password: &str) -> bool {
    identifier == DEMO_IDENTIFIER && password == DEMO_PASSWORD
}
