// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges
//! Phosphor file-icon mapping for document list rows.
//!
//! Covers the formats offered by the upload dialog; the picker filter is
//! advisory, so anything else falls back to a generic icon.

/// Return a Phosphor file icon matching the MIME type or file name.
pub fn icon_for(mime: &str, name: &str) -> &'static str {
    let mime = mime
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if mime == "application/pdf" || ext == "pdf" {
        return egui_phosphor::regular::FILE_PDF;
    }
    if mime.starts_with("image/") || matches!(ext.as_str(), "png" | "jpg" | "jpeg") {
        return match ext.as_str() {
            "png" => egui_phosphor::regular::FILE_PNG,
            "jpg" | "jpeg" => egui_phosphor::regular::FILE_JPG,
            _ => egui_phosphor::regular::FILE_IMAGE,
        };
    }
    if mime == "application/msword"
        || mime == "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        || ext == "doc"
        || ext == "docx"
    {
        return egui_phosphor::regular::FILE_DOC;
    }
    if ext == "txt" || mime.starts_with("text/") {
        return egui_phosphor::regular::FILE_TXT;
    }

    egui_phosphor::regular::FILE
}
