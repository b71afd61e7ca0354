// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared helper utilities reused by UI and portal logic.

pub mod file_icons;
pub mod inspect;

/// Select a Phosphor icon for the given MIME/file name.
pub use file_icons::icon_for;
/// Read the upload descriptor of a picked file.
pub use inspect::inspect_file;
