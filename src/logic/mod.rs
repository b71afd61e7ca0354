// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Portal logic that is neither pure data nor rendering.

pub mod auth;
pub mod scheduler;
