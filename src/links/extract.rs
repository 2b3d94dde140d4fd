use once_cell::sync::Lazy;
use regex::Regex;

static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)https?://\S+").unwrap());

/// Every URL-shaped substring of `text`, in order of appearance.
///
/// Duplicates are yielded as often as they occur.
pub fn extract_links(text: &str) -> impl Iterator<Item = &str> {
    URL_REGEX.find_iter(text).map(|m| m.as_str())
}

/// `text` with every link replaced by a single space.
pub fn strip_links(text: &str) -> String {
    URL_REGEX.replace_all(text, " ").into_owned()
}
