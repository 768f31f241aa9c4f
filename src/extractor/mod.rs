pub mod docx;
pub mod errors;
pub mod language;
pub mod legacy_doc;
pub mod model;
pub mod pdf;
pub mod plain;

pub use errors::ExtractError;
pub use language::DetectedLanguage;

use bytes::Bytes;
use tracing::{debug, instrument};

/// Content document formats accepted by the blog ingestion endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    LegacyDoc,
    PlainText,
}

impl DocumentKind {
    /// Classify by file extension, case-insensitively.
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractError> {
        let lower = file_name.to_ascii_lowercase();
        let extension = lower.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
        match extension {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "doc" => Ok(Self::LegacyDoc),
            "txt" | "md" => Ok(Self::PlainText),
            _ => Err(ExtractError::UnsupportedFormat(file_name.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub kind: DocumentKind,
    pub text: String,
    pub language: Option<DetectedLanguage>,
}

/// Turn an uploaded content document into normalized plain text. Parsing runs
/// on the blocking pool since large PDFs take a while.
#[instrument(skip(bytes), fields(size = bytes.len()))]
pub async fn extract(file_name: &str, bytes: Bytes) -> Result<ExtractedDocument, ExtractError> {
    let kind = DocumentKind::from_file_name(file_name)?;

    let raw = tokio::task::spawn_blocking(move || match kind {
        DocumentKind::Pdf => pdf::extract(&bytes),
        DocumentKind::Docx => docx::extract(&bytes),
        DocumentKind::LegacyDoc => legacy_doc::extract(&bytes),
        DocumentKind::PlainText => plain::decode_text(&bytes),
    })
    .await
    .map_err(|e| ExtractError::Task(e.to_string()))??;

    let text = model::normalize_text(&raw);
    if text.is_empty() {
        return Err(ExtractError::Empty);
    }

    let language = language::detect_language(&text);
    debug!(?kind, chars = text.chars().count(), ?language, "extracted content document");

    Ok(ExtractedDocument {
        kind,
        text,
        language,
    })
}
