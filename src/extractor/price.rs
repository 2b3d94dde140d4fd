use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::links::extract::strip_links;

/// Amounts people type in deal posts: `₹499`, `Rs. 1,299`, `@349`, `499/-`,
/// `799 rs`.
static MESSAGE_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:₹|\brs\.?|\binr|@)\s*(\d[\d,]*(?:\.\d{1,2})?)|(\d[\d,]*(?:\.\d{1,2})?)\s*(?:/-|rs\b|inr\b|₹)",
    )
    .unwrap()
});

/// Same as `MESSAGE_PRICE` minus the `@` shorthand, which on a web page is
/// far more likely to be an email address or a handle.
static PAGE_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:₹|\brs\.?|\binr)\s*(\d[\d,]*(?:\.\d{1,2})?)|(\d[\d,]*(?:\.\d{1,2})?)\s*(?:/-|rs\b|inr\b|₹)",
    )
    .unwrap()
});

static JSON_LD_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(?:price|lowPrice)"\s*:\s*"?(\d[\d,]*(?:\.\d{1,2})?)"#).unwrap()
});

static META_PRICE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        r#"meta[property="product:price:amount"], meta[property="og:price:amount"], [itemprop="price"]"#,
    )
    .unwrap()
});

static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

/// Price from the chat message, else from the page.
///
/// The message wins because a price typed by a person is usually the live
/// deal price while the page may show MRP or a cached amount.
pub fn extract_price(message_text: &str, document: &Html, markup: &str) -> Option<String> {
    price_in_message(message_text).or_else(|| price_in_page(document, markup))
}

/// First amount in the message, ignoring anything inside links.
pub fn price_in_message(text: &str) -> Option<String> {
    first_amount(&MESSAGE_PRICE, &strip_links(text))
}

/// Structured price metadata first, then JSON-LD, then visible text.
pub fn price_in_page(document: &Html, markup: &str) -> Option<String> {
    let from_meta = document
        .select(&META_PRICE)
        .filter_map(|element| element.value().attr("content"))
        .find_map(normalize_amount);
    if from_meta.is_some() {
        return from_meta;
    }

    let from_json_ld = JSON_LD_PRICE
        .captures_iter(markup)
        .filter_map(|caps| caps.get(1))
        .find_map(|m| normalize_amount(m.as_str()));
    if from_json_ld.is_some() {
        return from_json_ld;
    }

    let text = document
        .select(&BODY)
        .next()
        .map(|body| body.text().collect::<Vec<_>>().join(" "))?;
    first_amount(&PAGE_PRICE, &text)
}

fn first_amount(pattern: &Regex, text: &str) -> Option<String> {
    pattern.captures_iter(text).find_map(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .and_then(|m| normalize_amount(m.as_str()))
    })
}

/// `"1,299.00"` becomes `"1299"`. Zero amounts are not prices.
fn normalize_amount(raw: &str) -> Option<String> {
    let digits: String = raw.trim().chars().filter(|c| *c != ',').collect();
    let amount = match digits.split_once('.') {
        Some((whole, fraction)) if fraction.chars().all(|c| c == '0') => whole.to_string(),
        _ => digits,
    };

    let is_number = !amount.is_empty()
        && amount.chars().all(|c| c.is_ascii_digit() || c == '.')
        && amount.chars().next().is_some_and(|c| c.is_ascii_digit());
    let is_zero = amount.chars().all(|c| c == '0' || c == '.');

    (is_number && !is_zero).then_some(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn message_price_forms() {
        assert_eq!(price_in_message("Kurti ₹499 only").as_deref(), Some("499"));
        assert_eq!(price_in_message("now Rs. 1,299!").as_deref(), Some("1299"));
        assert_eq!(price_in_message("loot @349").as_deref(), Some("349"));
        assert_eq!(price_in_message("just 799/- today").as_deref(), Some("799"));
        assert_eq!(price_in_message("deal 650 rs").as_deref(), Some("650"));
        assert_eq!(price_in_message("INR 99.50").as_deref(), Some("99.50"));
    }

    #[test]
    fn message_first_amount_wins() {
        assert_eq!(
            price_in_message("was Rs 999 now Rs 499").as_deref(),
            Some("999")
        );
    }

    #[test]
    fn message_without_price() {
        assert_eq!(price_in_message("check this out, size M 560034"), None);
        assert_eq!(price_in_message("offers 200 coupons"), None);
    }

    #[test]
    fn message_ignores_amounts_inside_links() {
        assert_eq!(
            price_in_message("https://www.amazon.in/dp/X?rs=5&p=@77 nice"),
            None
        );
    }

    #[test]
    fn page_meta_price() {
        let html = r#"<html><head><meta property="product:price:amount" content="1499.00"></head><body>₹2,999</body></html>"#;
        assert_eq!(price_in_page(&doc(html), html).as_deref(), Some("1499"));
    }

    #[test]
    fn page_itemprop_price() {
        let html = r#"<html><body><span itemprop="price" content="459">₹459</span></body></html>"#;
        assert_eq!(price_in_page(&doc(html), html).as_deref(), Some("459"));
    }

    #[test]
    fn page_json_ld_price() {
        let html = r#"<html><head><script type="application/ld+json">{"@type":"Product","offers":{"@type":"Offer","price":"2,349","priceCurrency":"INR"}}</script></head><body></body></html>"#;
        assert_eq!(price_in_page(&doc(html), html).as_deref(), Some("2349"));
    }

    #[test]
    fn page_visible_text_price() {
        let html = "<html><body><div class=\"price\"><span>&#8377;</span><span>1,099</span></div></body></html>";
        assert_eq!(price_in_page(&doc(html), html).as_deref(), Some("1099"));
    }

    #[test]
    fn page_without_price() {
        let html = "<html><body>contact us at deals@shop.example</body></html>";
        assert_eq!(price_in_page(&doc(html), html), None);
    }

    #[test]
    fn message_beats_page() {
        let html = r#"<html><head><meta property="og:price:amount" content="999"></head></html>"#;
        assert_eq!(
            extract_price("grab it @499", &doc(html), html).as_deref(),
            Some("499")
        );
        assert_eq!(extract_price("grab it", &doc(html), html).as_deref(), Some("999"));
    }

    #[test]
    fn normalizes_amounts() {
        assert_eq!(normalize_amount("1,299.00").as_deref(), Some("1299"));
        assert_eq!(normalize_amount("349.50").as_deref(), Some("349.50"));
        assert_eq!(normalize_amount("0"), None);
        assert_eq!(normalize_amount("0.00"), None);
        assert_eq!(normalize_amount(""), None);
        assert_eq!(normalize_amount("abc"), None);
    }
}
