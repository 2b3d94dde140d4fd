use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

use crate::config::LinkPolicy;
use crate::extractor::model::normalize_whitespace;

const MAX_TITLE_CHARS: usize = 120;

/// Words that mark a title segment as storefront boilerplate.
const BOILERPLATE_WORDS: &[&str] = &[
    "buy",
    "shop",
    "online",
    "shopping",
    "review",
    "reviews",
    "ratings",
    "price",
    "prices",
    "india",
    ".com",
    ".in",
];

static OG_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:title"]"#).unwrap());
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());

static SITE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^amazon(?:\.[a-z]{2,3}){1,2}\s*:\s*").unwrap());
static BUY_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^buy\s+").unwrap());
static PRICE_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(?:online\s+)?at\s+(?:best|low|lowest)\s+prices?\b.*$").unwrap()
});
static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+[|\-–—:]\s+").unwrap());

/// The best title candidate in the document: Open Graph title, then
/// `<title>`, then the first `<h1>`.
pub fn raw_title(document: &Html) -> Option<String> {
    let og = document
        .select(&OG_TITLE)
        .filter_map(|element| element.value().attr("content"))
        .map(normalize_whitespace)
        .find(|content| !content.is_empty());
    if og.is_some() {
        return og;
    }

    [&*TITLE, &*H1].into_iter().find_map(|selector| {
        document
            .select(selector)
            .next()
            .map(|element| normalize_whitespace(&element.text().collect::<String>()))
            .filter(|text| !text.is_empty())
    })
}

/// A readable stand-in derived from the URL path, e.g.
/// `/cotton-kurti/p/2xyz` becomes `cotton kurti p 2xyz`. Empty for a root
/// path.
pub fn title_from_path(url: &Url) -> String {
    normalize_whitespace(&url.path().replace(['/', '-'], " "))
}

/// Strip storefront boilerplate from a scraped title.
///
/// May return an empty string when the whole title was boilerplate.
pub fn clean_title(raw: &str, policy: &LinkPolicy) -> String {
    let mut title = normalize_whitespace(raw);
    title = SITE_PREFIX.replace(&title, "").into_owned();

    // Peel storefront suffixes such as " | Flipkart.com" one at a time.
    loop {
        let Some((start, end)) = SEPARATOR
            .find_iter(&title)
            .last()
            .map(|m| (m.start(), m.end()))
        else {
            break;
        };
        if !is_boilerplate(&title[end..], policy) {
            break;
        }
        title.truncate(start);
    }

    title = BUY_PREFIX.replace(&title, "").into_owned();
    title = PRICE_TAIL.replace(&title, "").into_owned();

    let title = title
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '|' | '-' | ':' | ','))
        .to_string();

    if is_site_name(&title, policy) {
        return String::new();
    }

    truncate_on_word(&title, MAX_TITLE_CHARS)
}

/// Title chain with the guaranteed non-empty fallback: cleaned document
/// title, then cleaned URL path, then the host.
pub fn resolve_title(document: &Html, url: &Url, policy: &LinkPolicy) -> String {
    let from_document = raw_title(document)
        .map(|raw| clean_title(&raw, policy))
        .filter(|title| !title.is_empty());
    if let Some(title) = from_document {
        return title;
    }

    let from_path = clean_title(&title_from_path(url), policy);
    if !from_path.is_empty() {
        return from_path;
    }

    url.host_str().unwrap_or("product").to_string()
}

fn is_boilerplate(segment: &str, policy: &LinkPolicy) -> bool {
    let segment = segment.to_lowercase();
    policy
        .marketplaces()
        .iter()
        .any(|name| segment.contains(name.as_str()))
        || segment
            .split(|c: char| c.is_whitespace() || c == '&' || c == ',')
            .any(|word| {
                BOILERPLATE_WORDS
                    .iter()
                    .any(|b| word == *b || (b.starts_with('.') && word.ends_with(b)))
            })
}

/// A bare storefront name such as `Amazon.in` or `www.meesho.com`.
fn is_site_name(title: &str, policy: &LinkPolicy) -> bool {
    if title.contains(char::is_whitespace) {
        return false;
    }
    let lower = title.to_lowercase();
    let stem = lower
        .trim_start_matches("www.")
        .split('.')
        .next()
        .unwrap_or_default();
    policy.marketplaces().iter().any(|name| name == stem)
}

fn truncate_on_word(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_chars).collect();
    let cut = match cut.rfind(' ') {
        Some(pos) if pos > 0 => &cut[..pos],
        _ => cut.as_str(),
    };
    format!("{}...", cut.trim_end_matches(|c: char| !c.is_alphanumeric()))
}
