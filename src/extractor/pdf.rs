use crate::extractor::errors::ExtractError;

/// Plain text of every page, pages separated by form feeds where the
/// extractor reports them.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    if !bytes.starts_with(b"%PDF") {
        return Err(ExtractError::Pdf("missing %PDF header".to_string()));
    }

    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
}
