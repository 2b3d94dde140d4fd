/// Postal code used when the message does not name one.
pub const DEFAULT_PIN: &str = "110001";
/// Size descriptor used when the message names no size.
pub const DEFAULT_SIZES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedProduct {
    /// Never empty.
    pub title: String,
    /// Bare amount such as `"1299"` or `"349.50"`.
    pub price: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketplaceMetadata {
    pub pin: String,
    pub sizes: String,
}

impl Default for MarketplaceMetadata {
    fn default() -> Self {
        Self {
            pin: DEFAULT_PIN.to_string(),
            sizes: DEFAULT_SIZES.to_string(),
        }
    }
}

/// Collapse every whitespace run (newlines included) to one space and trim.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
