//! Best-effort text recovery for Word 97-2003 `.doc` files.
//!
//! The binary format keeps the document text in the `WordDocument` stream,
//! either as UTF-16LE or as 8-bit windows-1252 when the piece is
//! "compressed". Rather than walking the piece table, this scans the whole
//! compound file for long runs of printable characters in both encodings and
//! keeps whichever reading yields more letters. Word ends paragraphs with
//! `\r`, which becomes a blank line.

use crate::extractor::errors::ExtractError;

const OLE_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
const MIN_RUN_CHARS: usize = 8;
const MIN_LETTER_RATIO: f64 = 0.6;

pub fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    if !bytes.starts_with(&OLE_SIGNATURE) {
        return Err(ExtractError::LegacyDoc(
            "not an OLE compound document".to_string(),
        ));
    }

    let wide = join_runs(utf16_runs(bytes));
    let narrow = join_runs(byte_runs(bytes));

    let text = if letter_count(&wide) >= letter_count(&narrow) {
        wide
    } else {
        narrow
    };
    if text.trim().is_empty() {
        return Err(ExtractError::Empty);
    }
    Ok(text)
}

fn is_text_char(c: char) -> bool {
    match c {
        '\r' | '\n' | '\t' => true,
        // private use area and specials show up in OLE headers and tables
        '\u{e000}'..='\u{f8ff}' | '\u{fff0}'..='\u{ffff}' => false,
        _ => !c.is_control(),
    }
}

fn utf16_runs(bytes: &[u8]) -> Vec<String> {
    let mut runs = Vec::new();
    let mut current = String::new();

    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
    for decoded in char::decode_utf16(units) {
        match decoded {
            Ok(c) if is_text_char(c) => current.push(c),
            _ => flush_run(&mut current, &mut runs),
        }
    }
    flush_run(&mut current, &mut runs);
    runs
}

fn byte_runs(bytes: &[u8]) -> Vec<String> {
    let mut runs = Vec::new();
    let printable = |b: u8| matches!(b, b'\r' | b'\n' | b'\t' | 0x20..=0x7E | 0xA0..=0xFF);

    for run in bytes.split(|b| !printable(*b)).filter(|r| !r.is_empty()) {
        let (decoded, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(run);
        let mut current = decoded.into_owned();
        flush_run(&mut current, &mut runs);
    }
    runs
}

fn flush_run(current: &mut String, runs: &mut Vec<String>) {
    let run = std::mem::take(current);
    let chars = run.chars().count();
    if chars < MIN_RUN_CHARS {
        return;
    }
    let wordish = run
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .count();
    if (wordish as f64) / (chars as f64) >= MIN_LETTER_RATIO {
        runs.push(run);
    }
}

fn join_runs(runs: Vec<String>) -> String {
    runs.iter()
        .flat_map(|run| run.split('\r'))
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn letter_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_alphabetic()).count()
}
