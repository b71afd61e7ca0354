// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Screen components structured for MVU-style updates.

pub mod dashboard;
pub mod form;
pub mod login;
pub mod signup;
