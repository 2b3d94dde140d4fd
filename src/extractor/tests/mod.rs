use reqwest::StatusCode;
use std::fs;
use url::Url;

use crate::config::LinkPolicy;
use crate::extractor::{extract, metadata};
use crate::fetcher::PageResponse;
use crate::links::{ResolvedLink, clean_url};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

fn link(url: &str) -> ResolvedLink {
    clean_url(Url::parse(url).unwrap(), &LinkPolicy::default())
}

fn page(html: String, link: &ResolvedLink) -> PageResponse {
    PageResponse::new(link.url().clone(), StatusCode::OK, html)
}

#[test]
fn test_extract_amazon_product() {
    let link = link("https://www.amazon.in/boAt-Airdopes-141/dp/B09N3ZNHTY");
    let response = page(fixture("amazon.html"), &link);

    let product = extract(&response, &link, "check this", &LinkPolicy::default());

    assert_eq!(product.title, "boAt Airdopes 141 Bluetooth TWS Earbuds");
    // visible selling price comes before the struck-through MRP
    assert_eq!(product.price.as_deref(), Some("1099"));
}

#[test]
fn test_extract_meesho_product() {
    let link = link("https://www.meesho.com/trendy-rayon-kurti/p/2xyz");
    let response = page(fixture("meesho.html"), &link);

    let product = extract(&response, &link, "", &LinkPolicy::default());

    assert_eq!(product.title, "Trendy Rayon Kurti For Women");
    assert_eq!(product.price.as_deref(), Some("349"));
}

#[test]
fn test_message_price_overrides_page() {
    let link = link("https://www.meesho.com/trendy-rayon-kurti/p/2xyz");
    let response = page(fixture("meesho.html"), &link);

    let product = extract(&response, &link, "loot deal @299", &LinkPolicy::default());

    assert_eq!(product.price.as_deref(), Some("299"));
}

#[test]
fn test_bare_page_falls_back_to_path() {
    let link = link("https://www.ajio.com/men-denim-jacket/p/469");
    let response = page(fixture("bare.html"), &link);

    let product = extract(&response, &link, "", &LinkPolicy::default());

    assert_eq!(product.title, "men denim jacket p 469");
    assert_eq!(product.price, None);
}

#[test]
fn test_metadata_comes_from_message_not_page() {
    // The page lists sizes and a postal code; only the chat text counts.
    let meta = metadata::detect("kurti for my sister");
    assert_eq!(meta.sizes, "All");
    assert_eq!(meta.pin, "110001");
}

#[test]
fn test_malformed_html() {
    let link = link("https://www.snapdeal.com/product/broken/1");
    let html = "<html><head><title>Broken Kettle | Snapdeal<body><p>Unclosed ₹ 899<div>".to_string();
    let response = page(html, &link);

    let product = extract(&response, &link, "", &LinkPolicy::default());

    assert!(!product.title.is_empty());
    assert!(!product.title.to_lowercase().contains("snapdeal"));
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(
            html in ".*",
            text in ".*",
            path in "[a-z0-9/-]{0,40}",
        ) {
            let link = link(&format!("https://www.meesho.com/{path}"));
            let response = page(html, &link);
            let product = extract(&response, &link, &text, &LinkPolicy::default());
            prop_assert!(!product.title.is_empty());
        }

        #[test]
        fn test_clean_url_is_idempotent(
            host in "(www\\.)?(amazon\\.in|flipkart\\.com|meesho\\.com|example\\.org)",
            path in "(/[a-zA-Z0-9-]{1,8}){0,3}",
            query in proptest::collection::vec(("[a-zA-Z_]{1,8}", "[a-zA-Z0-9 %+]{0,6}"), 0..5),
        ) {
            let query = query
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&");
            let raw = format!("http://{host}{path}?{query}");
            if let Ok(url) = Url::parse(&raw) {
                let policy = LinkPolicy::default();
                let once = clean_url(url, &policy);
                let twice = clean_url(once.url().clone(), &policy);
                prop_assert_eq!(once, twice);
            }
        }
    }
}
