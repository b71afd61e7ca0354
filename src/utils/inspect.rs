// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Turn a picked path into the descriptor used by simulated uploads.

use std::path::Path;

use anyhow::{Context, Result};

use crate::models::document::FileDescriptor;

/// Read name, size, and guessed MIME type of a file without touching its content.
///
/// # Errors
///
/// Returns an error when the file metadata cannot be read.
pub fn inspect_file(path: &Path) -> Result<FileDescriptor> {
    let metadata = path
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {:?}", path))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    Ok(FileDescriptor {
        name,
        mime_type: guess_mime(path),
        size_bytes: metadata.len(),
    })
}

pub(crate) fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
