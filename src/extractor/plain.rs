use encoding_rs::Encoding;

use crate::extractor::errors::ExtractError;

/// Decode an uploaded `.txt`/`.md` draft. A BOM wins, then strict UTF-8, then
/// chardetng's guess (drafts from Windows editors are often windows-1252 or
/// windows-1256).
pub fn decode_text(bytes: &[u8]) -> Result<String, ExtractError> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_with(encoding, &bytes[bom_len..]);
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);

    decode_with(encoding, bytes)
}

fn decode_with(encoding: &'static Encoding, bytes: &[u8]) -> Result<String, ExtractError> {
    let (decoded, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(ExtractError::Charset(format!(
            "content is not valid {}",
            encoding.name()
        )));
    }
    Ok(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_text("Hello, دبي!".as_bytes()).unwrap(), "Hello, دبي!");
    }

    #[test]
    fn test_decode_utf8_bom_is_stripped() {
        let bytes = [&[0xEF, 0xBB, 0xBF][..], b"Overview"].concat();
        assert_eq!(decode_text(&bytes).unwrap(), "Overview");
    }

    #[test]
    fn test_decode_utf16le_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "Permit".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_text(&bytes).unwrap(), "Permit");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // "café approvals" with 0xE9 for é
        let bytes = b"caf\xe9 approvals and building permits";
        let decoded = decode_text(bytes).unwrap();
        assert!(decoded.starts_with("café"));
    }
}
