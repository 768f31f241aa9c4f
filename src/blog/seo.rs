use crate::blog::model::SeoMeta;

const FOCUS_KEYWORD_WORDS: usize = 3;
const MIN_KEYWORD_CHARS: usize = 4;

/// SEO-related fields of a blog submission, as received.
#[derive(Debug, Default, Clone)]
pub struct SeoInput<'a> {
    pub manual: bool,
    pub title: &'a str,
    pub excerpt: &'a str,
    pub meta_title: Option<&'a str>,
    pub meta_description: Option<&'a str>,
    pub focus_keyword: Option<&'a str>,
    /// Comma-separated.
    pub keywords: Option<&'a str>,
}

/// Manual mode takes each submitted field verbatim and falls back per field
/// (title, excerpt, derived values) when it is blank. Automatic mode derives
/// everything from the title and excerpt.
pub fn derive_seo(input: &SeoInput<'_>, site_name: &str) -> SeoMeta {
    if !input.manual {
        return SeoMeta {
            meta_title: format!("{} | {}", input.title.trim(), site_name),
            meta_description: input.excerpt.trim().to_string(),
            focus_keyword: focus_keyword_from(input.title),
            keywords: keywords_from(input.title),
        };
    }

    let keywords: Vec<String> = non_blank(input.keywords)
        .map(|raw| {
            let mut out: Vec<String> = Vec::new();
            for kw in raw.split(',').map(str::trim).filter(|k| !k.is_empty()) {
                if !out.iter().any(|seen| seen.eq_ignore_ascii_case(kw)) {
                    out.push(kw.to_string());
                }
            }
            out
        })
        .filter(|list| !list.is_empty())
        .unwrap_or_else(|| keywords_from(input.title));

    SeoMeta {
        meta_title: non_blank(input.meta_title)
            .unwrap_or(input.title)
            .to_string(),
        meta_description: non_blank(input.meta_description)
            .unwrap_or(input.excerpt)
            .to_string(),
        focus_keyword: non_blank(input.focus_keyword)
            .map(str::to_string)
            .unwrap_or_else(|| focus_keyword_from(input.title)),
        keywords,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn focus_keyword_from(title: &str) -> String {
    title
        .split_whitespace()
        .take(FOCUS_KEYWORD_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn keywords_from(title: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for word in title.split_whitespace() {
        let word = word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if word.chars().count() >= MIN_KEYWORD_CHARS && !keywords.contains(&word) {
            keywords.push(word);
        }
    }
    keywords
}
