use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, DocumentRole};
use crate::presentation::config::ExtractionSettings;

use super::text_sanitizer::sanitize_extracted_text;
#[derive(Debug, Clone)]
pub struct ExtractionLimits {
    pub reference_max_pages: usize,
    pub syllabus_max_pages: usize,
    pub hard_page_limit: usize,
    pub max_chars: usize,
    pub timeout: Duration,
}

impl ExtractionLimits {
    pub fn from_settings(settings: &ExtractionSettings) -> Self {
        Self {
            reference_max_pages: settings.reference_max_pages,
            syllabus_max_pages: settings.syllabus_max_pages,
            hard_page_limit: settings.hard_page_limit,
            max_chars: settings.max_chars,
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }

    pub fn max_pages(&self, role: DocumentRole) -> usize {
        let requested = match role {
            DocumentRole::Reference => self.reference_max_pages,
            DocumentRole::Syllabus => self.syllabus_max_pages,
        };
        requested.min(self.hard_page_limit)
    }
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self::from_settings(&ExtractionSettings::default())
    }
}

pub struct PdfAdapter {
    limits: ExtractionLimits,
}

impl PdfAdapter {
    pub fn new(limits: ExtractionLimits) -> Self {
        Self { limits }
    }
    fn extract_pages(
        path: &std::path::Path,
        max_pages: usize,
        max_chars: usize,
    ) -> Result<Vec<String>, FileLoaderError> {
        let doc = PdfDocument::open(path)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let page_count = doc.page_count().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;

        let pages_to_read = page_count.min(max_pages);
        if pages_to_read < page_count {
            tracing::info!(page_count, pages_to_read, "Limiting PDF pages processed");
        }

        let mut pages = Vec::with_capacity(pages_to_read);
        let mut collected = 0usize;

        for page_index in 0..pages_to_read {
            let text = match doc.extract_text(page_index) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(page = page_index + 1, error = %e, "Skipping unreadable page");
                    continue;
                }
            };

            if text.trim().is_empty() {
                continue;
            }

            collected += text.chars().count();
            pages.push(text);

            if collected >= max_chars {
                tracing::info!(
                    pages_read = page_index + 1,
                    max_chars,
                    "Text limit reached, stopping extraction"
                );
                break;
            }
        }

        Ok(pages)
    }
}

fn truncate_to_chars(mut text: String, max_chars: usize) -> String {
    if let Some((idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(idx);
    }
    text
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            role = %document.role,
            filename = %document.filename,
            size_bytes = document.size_bytes,
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;

        temp_file.write_all(data).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let temp_path = temp_file.path().to_path_buf();
        let filename = document.filename.clone();
        let max_pages = self.limits.max_pages(document.role);
        let max_chars = self.limits.max_chars;

        let pages = tokio::time::timeout(
            self.limits.timeout,
            tokio::task::spawn_blocking(move || {
                Self::extract_pages(&temp_path, max_pages, max_chars)
            }),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        drop(temp_file);

        let sanitized_pages: Vec<String> = pages
            .iter()
            .map(|p| sanitize_extracted_text(p))
            .filter(|t| !t.is_empty())
            .collect();

        if sanitized_pages.is_empty() {
            return Err(FileLoaderError::NoTextFound(filename));
        }

        let text = truncate_to_chars(sanitized_pages.join("\n\n"), max_chars);
        tracing::info!(
            page_count = sanitized_pages.len(),
            chars = text.chars().count(),
            "PDF text extraction complete"
        );

        Ok(text)
    }
}
