pub mod metadata;
pub mod model;
pub mod price;
pub mod title;

#[cfg(test)]
mod tests;

pub use model::{ExtractedProduct, MarketplaceMetadata};

use scraper::Html;

use crate::config::LinkPolicy;
use crate::fetcher::PageResponse;
use crate::links::ResolvedLink;

/// Pull a title and price for `link` out of the fetched page.
///
/// `message_text` is consulted for the price before the page is. The parsed
/// document never outlives this call, so callers can hold the result across
/// `.await` points.
pub fn extract(
    page: &PageResponse,
    link: &ResolvedLink,
    message_text: &str,
    policy: &LinkPolicy,
) -> ExtractedProduct {
    let document = Html::parse_document(&page.body_utf8);

    let title = title::resolve_title(&document, link.url(), policy);
    let price = price::extract_price(message_text, &document, &page.body_utf8);

    ExtractedProduct { title, price }
}
