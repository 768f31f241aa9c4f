//! Turns extracted document text into the post's rendering unit.
//!
//! Blocks are separated by blank lines. A short block without a period reads
//! as a heading; anything else is body text. There is no smarter layout
//! recovery: a document without blank lines becomes one paragraph.

use linkify::{LinkFinder, LinkKind};
use maud::{Markup, PreEscaped, html};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::extractor::DetectedLanguage;

/// Blocks at or above this many characters are never headings.
pub const HEADING_MAX_CHARS: usize = 100;

static BLOCK_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]*\n").expect("block separator regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Paragraph(String),
}

/// Classify one block of text. Inner whitespace is collapsed.
pub fn classify(block: &str) -> Block {
    let text = block.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() < HEADING_MAX_CHARS && !text.contains('.') {
        Block::Heading(text)
    } else {
        Block::Paragraph(text)
    }
}

pub fn split_blocks(text: &str) -> Vec<Block> {
    let text = text.replace("\r\n", "\n");
    BLOCK_SEPARATOR
        .split(&text)
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(classify)
        .collect()
}

/// Render the blocks as a standalone `<article>` fragment.
pub fn render_article(blocks: &[Block], language: Option<&DetectedLanguage>) -> String {
    let body = html! {
        @for block in blocks {
            @match block {
                Block::Heading(text) => { h2 { (text) } }
                Block::Paragraph(text) => { p { (linkify(text)) } }
            }
        }
    };
    // ammonia's defaults keep h2/p/a and add rel="noopener noreferrer"
    let body = ammonia::clean(&body.into_string());

    let (lang, dir) = language
        .map(|l| (l.code.as_str(), l.dir()))
        .unwrap_or(("en", "ltr"));
    html! {
        article class="blog-content" lang=(lang) dir=(dir) { (PreEscaped(body)) }
    }
    .into_string()
}

/// `split_blocks` followed by `render_article`.
pub fn format_document(text: &str, language: Option<&DetectedLanguage>) -> String {
    render_article(&split_blocks(text), language)
}

fn linkify(text: &str) -> Markup {
    let mut finder = LinkFinder::new();
    finder.kinds(&[LinkKind::Url]);

    html! {
        @for span in finder.spans(text) {
            @if let Some(LinkKind::Url) = span.kind() {
                a href=(span.as_str()) { (span.as_str()) }
            } @else {
                (span.as_str())
            }
        }
    }
}
