use std::fmt;

use super::StoragePath;

pub const PDF_MIME: &str = "application/pdf";
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentRole {
    Reference,
    Syllabus,
}

impl DocumentRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentRole::Reference => "reference",
            DocumentRole::Syllabus => "syllabus",
        }
    }
    pub fn form_field(&self) -> &'static str {
        match self {
            DocumentRole::Reference => "reference_book",
            DocumentRole::Syllabus => "syllabus",
        }
    }
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub role: DocumentRole,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: u64,
}

impl Document {
    pub fn new(
        role: DocumentRole,
        filename: String,
        content_type: String,
        size_bytes: u64,
    ) -> Self {
        Self {
            role,
            filename,
            content_type,
            size_bytes,
        }
    }
}
#[derive(Debug, Clone, PartialEq)]
pub struct StagedDocument {
    pub document: Document,
    pub storage_path: StoragePath,
}
pub fn is_pdf_upload(filename: &str, content_type: Option<&str>) -> bool {
    match content_type.map(|ct| ct.trim().to_ascii_lowercase()) {
        Some(ct) if ct == PDF_MIME || ct == "application/x-pdf" => true,
        Some(ct) if !ct.is_empty() && ct != "application/octet-stream" => false,
        _ => filename.to_ascii_lowercase().ends_with(".pdf"),
    }
}
