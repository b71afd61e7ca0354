// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Document metadata records and the in-memory registry behind the dashboard (UI-agnostic).

use chrono::NaiveDate;
use uuid::Uuid;

/// Extensions offered by the upload dialog. Advisory only; content is never inspected.
pub const ACCEPTED_EXTENSIONS: [&str; 6] = ["pdf", "doc", "docx", "jpg", "jpeg", "png"];

/// File chosen for upload, as reported by the picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileDescriptor {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

/// Metadata of a simulated upload. No file content is kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentRecord {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    /// Size in mebibytes with two decimals, e.g. `2.00 MB`.
    pub size_label: String,
    pub uploaded_on: NaiveDate,
}

impl DocumentRecord {
    /// Upload date as shown in the document list (`dd/mm/yyyy`).
    pub fn uploaded_on_label(&self) -> String {
        self.uploaded_on.format("%d/%m/%Y").to_string()
    }
}

/// Format a byte count as megabytes with two decimals.
pub fn size_label(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Ordered list of uploaded documents, most recent first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentRegistry {
    documents: Vec<DocumentRecord>,
}

impl DocumentRegistry {
    /// All records, most recent first.
    pub fn list(&self) -> &[DocumentRecord] {
        &self.documents
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Materialize a finished upload and put it at the front of the list.
    pub fn insert_upload(&mut self, file: FileDescriptor, uploaded_on: NaiveDate) -> &DocumentRecord {
        let id = self.fresh_id();
        tracing::debug!(%id, name = %file.name, "registry: insert");
        self.documents.insert(
            0,
            DocumentRecord {
                id,
                size_label: size_label(file.size_bytes),
                name: file.name,
                mime_type: file.mime_type,
                size_bytes: file.size_bytes,
                uploaded_on,
            },
        );
        &self.documents[0]
    }

    /// Remove the record with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.documents.len();
        self.documents.retain(|doc| doc.id != id);
        let removed = self.documents.len() != before;
        if !removed {
            tracing::debug!(%id, "registry: delete of unknown id ignored");
        }
        removed
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().simple().to_string();
            if !self.documents.iter().any(|doc| doc.id == id) {
                return id;
            }
        }
    }
}
