use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("unsupported content document '{0}' (expected .pdf, .docx, .doc, .txt or .md)")]
    UnsupportedFormat(String),

    #[error("pdf extraction failed: {0}")]
    Pdf(String),

    #[error("docx extraction failed: {0}")]
    Docx(String),

    #[error("doc extraction failed: {0}")]
    LegacyDoc(String),

    #[error("charset error: {0}")]
    Charset(String),

    #[error("content document contains no text")]
    Empty,

    #[error("extraction task failed: {0}")]
    Task(String),
}
