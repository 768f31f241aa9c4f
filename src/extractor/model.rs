use regex::Regex;
use std::sync::LazyLock;

static INLINE_SPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\u{a0}]+").expect("inline space regex"));

static TRAILING_SPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m) +$").expect("trailing space regex"));

static BLANK_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank run regex"));

/// Canonical line endings and spacing for extracted text. Blank lines are
/// kept (collapsed to exactly one) because they delimit paragraphs.
pub fn normalize_text(text: &str) -> String {
    let text = text
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        // PDF page breaks
        .replace('\u{c}', "\n\n");

    let spaced = INLINE_SPACE_REGEX.replace_all(&text, " ");
    let trimmed = TRAILING_SPACE_REGEX.replace_all(&spaced, "");
    let text = trimmed
        .lines()
        .map(str::trim_start)
        .collect::<Vec<_>>()
        .join("\n");

    BLANK_RUN_REGEX
        .replace_all(&text, "\n\n")
        .trim()
        .to_string()
}
