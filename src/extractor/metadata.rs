use regex::Regex;
use std::sync::LazyLock;

use crate::extractor::model::{DEFAULT_PIN, DEFAULT_SIZES, MarketplaceMetadata};

static PIN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{6}\b").unwrap());

static SIZE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(S|M|L|XL|XXL|\d{2}-\d{2})\b").unwrap());

/// First standalone 6-digit run, or the default postal code.
pub fn detect_pin(text: &str) -> String {
    PIN_REGEX
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_PIN.to_string())
}

/// Distinct size tokens, uppercased, in order of first appearance.
pub fn detect_sizes(text: &str) -> String {
    let mut sizes: Vec<String> = Vec::new();
    for m in SIZE_REGEX.find_iter(text) {
        let size = m.as_str().to_ascii_uppercase();
        if !sizes.contains(&size) {
            sizes.push(size);
        }
    }

    if sizes.is_empty() {
        DEFAULT_SIZES.to_string()
    } else {
        sizes.join(", ")
    }
}

pub fn detect(text: &str) -> MarketplaceMetadata {
    MarketplaceMetadata {
        pin: detect_pin(text),
        sizes: detect_sizes(text),
    }
}
