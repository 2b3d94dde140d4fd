use encoding_rs::Encoding;
use reqwest::StatusCode;
use url::Url;

/// A fetched page after redirects, decoded to UTF-8.
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// Where the redirect chain ended.
    pub url_final: Url,
    /// Recorded for logging only; callers never branch on it.
    pub status: StatusCode,
    pub body_utf8: String,
    pub encoding: &'static Encoding,
}

impl PageResponse {
    /// A UTF-8 page, used by in-memory sources.
    pub fn new(url_final: Url, status: StatusCode, body_utf8: impl Into<String>) -> Self {
        Self {
            url_final,
            status,
            body_utf8: body_utf8.into(),
            encoding: encoding_rs::UTF_8,
        }
    }
}
