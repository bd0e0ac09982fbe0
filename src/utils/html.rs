//! Markup helpers shared by the page parsers
//!
//! Everything here is best-effort: a helper that cannot find or parse what
//! it is asked for returns `None` (or an empty list) instead of failing.

use once_cell::sync::Lazy;
use regex::Regex;
use regex::Captures;
use scraper::{ElementRef, Html, Selector};

static BR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*<\s*br\s*/?\s*>\s*").expect("valid br regex"));
static PARAGRAPH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<\s*/\s*p\s*>\s*<\s*p[^>]*>").expect("valid paragraph regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
// A unit letter only counts when it stands alone; any trailing text must be a separate word.
static COUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(\d(?:[\d,.]|\s\d)*)(?:\s*([kKmMbB])\b)?(?:\s+\S.*)?$")
        .expect("valid count regex")
});
static ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);").expect("valid entity regex")
});

/// Decode HTML character references (`&amp;`, `&#39;`, `&quot;` ...)
///
/// Only `;`-terminated references are decoded, so query strings such as
/// `&timestamp=1&para=2` pass through untouched.
pub fn unescape_html(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures<'_>| {
            Html::parse_fragment(&caps[0])
                .root_element()
                .text()
                .collect::<String>()
        })
        .into_owned()
}

/// Strip tags, turn line breaks into newlines, decode entities and trim
pub fn clean_html(html: &str) -> String {
    let html = html.replace('\n', " ");
    let html = BR_RE.replace_all(&html, "\n");
    let html = PARAGRAPH_RE.replace_all(&html, "\n");
    let html = TAG_RE.replace_all(&html, "");
    unescape_html(&html).trim().to_string()
}

/// Cleaned inner markup of an element
pub fn element_text(element: &ElementRef<'_>) -> String {
    clean_html(&element.inner_html())
}

/// Build a selector matching elements that carry every class in `classes`
/// (space separated, e.g. `"item btn_link"`).
pub fn class_selector(classes: &str) -> Option<Selector> {
    let compound: String = classes
        .split_whitespace()
        .map(|class| format!(".{}", class))
        .collect();
    if compound.is_empty() {
        return None;
    }
    Selector::parse(&compound).ok()
}

/// All elements in the document carrying the given class(es), in document order
pub fn elements_by_class<'a>(document: &'a Html, classes: &str) -> Vec<ElementRef<'a>> {
    match class_selector(classes) {
        Some(selector) => document.select(&selector).collect(),
        None => Vec::new(),
    }
}

/// All descendants of `parent` carrying the given class(es)
pub fn children_by_class<'a>(parent: &ElementRef<'a>, classes: &str) -> Vec<ElementRef<'a>> {
    match class_selector(classes) {
        Some(selector) => parent.select(&selector).collect(),
        None => Vec::new(),
    }
}

/// First descendant of `parent` carrying the given class(es)
pub fn child_by_class<'a>(parent: &ElementRef<'a>, classes: &str) -> Option<ElementRef<'a>> {
    let selector = class_selector(classes)?;
    parent.select(&selector).next()
}

/// First element whose `attr` equals `value` exactly
pub fn element_by_attribute<'a>(
    document: &'a Html,
    attr: &str,
    value: &str,
) -> Option<ElementRef<'a>> {
    document
        .tree
        .nodes()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().attr(attr) == Some(value))
}

/// First capture group of `re` in `text`, HTML-cleaned; `None` when absent or blank
pub fn html_search_regex(re: &Regex, text: &str) -> Option<String> {
    let captured = re.captures(text)?.get(1)?.as_str();
    let cleaned = clean_html(captured);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// First capture group of `re` in `text`, raw
pub fn search_regex(re: &Regex, text: &str) -> Option<String> {
    Some(re.captures(text)?.get(1)?.as_str().to_string())
}

/// Parse display durations such as `5:47`, `1:02:03` or `59`
pub fn parse_duration(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() > 3 {
        return None;
    }
    let mut seconds = 0.0;
    for part in parts {
        let value: f64 = part.trim().parse().ok()?;
        seconds = seconds * 60.0 + value;
    }
    Some(seconds)
}

/// Parse human counts such as `1 234`, `1,234`, `12K`, `1.5M` or `5 bookmarks`
///
/// Returns `None` when anything other than a unit or a following word is
/// attached to the number (`95%`).
pub fn parse_count(text: &str) -> Option<u64> {
    let caps = COUNT_RE.captures(text.trim())?;
    let number: String = caps
        .get(1)?
        .as_str()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(suffix) => {
            let value: f64 = number.replace(',', "").parse().ok()?;
            let multiplier = match suffix.as_str() {
                "k" => 1e3,
                "m" => 1e6,
                _ => 1e9,
            };
            Some((value * multiplier).round() as u64)
        }
        None => number.replace([',', '.'], "").parse().ok(),
    }
}
