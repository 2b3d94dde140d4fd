use bytes::Bytes;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use url::Url;

use crate::fetcher::types::PageResponse;

/// How far into the body to look for a `<meta>` charset declaration.
const SNIFF_LEN: usize = 4096;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>;]+)"#).unwrap());

pub fn process_response(
    url_final: Url,
    status: StatusCode,
    content_type: Option<&str>,
    body_bytes: Bytes,
) -> PageResponse {
    let encoding = detect_encoding(content_type, &body_bytes);
    // Lossy on purpose: a few bad bytes must not cost us the title.
    let (decoded, _, _) = encoding.decode(&body_bytes);

    PageResponse {
        url_final,
        status,
        body_utf8: decoded.into_owned(),
        encoding,
    }
}

/// Header charset, then `<meta>` charset (which also covers the
/// `http-equiv` form), then statistical sniffing.
fn detect_encoding(content_type: Option<&str>, body_bytes: &[u8]) -> &'static Encoding {
    if let Some(encoding) = content_type.and_then(|ct| label_from(&CHARSET_REGEX, ct)) {
        return encoding;
    }

    let head = &body_bytes[..body_bytes.len().min(SNIFF_LEN)];
    let head_str = String::from_utf8_lossy(head);
    if let Some(encoding) = label_from(&META_CHARSET_REGEX, &head_str) {
        return encoding;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(head, body_bytes.len() <= SNIFF_LEN);
    detector.guess(None, true)
}

fn label_from(pattern: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = pattern.captures(haystack)?.get(1)?.as_str().to_ascii_lowercase();
    Encoding::for_label(label.as_bytes())
}
