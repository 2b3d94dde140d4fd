use crate::config::Config;
use crate::fetcher::{
    errors::FetchError, pipeline::process_response, source::PageSource, types::PageResponse,
};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use tracing::{debug, instrument};
use url::Url;

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const MAX_REDIRECTS: usize = 10;

/// reqwest-backed page source shared by redirect resolution and page fetches.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = ClientBuilder::new()
            .connect_timeout(config.http_timeout())
            .timeout(config.http_timeout())
            .user_agent(config.user_agent())
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static(
                        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                    ),
                );
                headers.insert(
                    reqwest::header::ACCEPT_LANGUAGE,
                    reqwest::header::HeaderValue::from_static("en-IN,en;q=0.9"),
                );
                headers
            })
            .build()
            .map_err(FetchError::from_reqwest_error)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    #[instrument(skip_all, fields(url = %url))]
    async fn get(&self, url: &Url) -> Result<PageResponse, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        if let Some(content_length) = response.content_length()
            && content_length > MAX_BODY_SIZE
        {
            return Err(FetchError::BodyTooLarge(content_length));
        }

        let final_url = response.url().clone();
        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .map(str::to_string);

        let body_bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Io(e.to_string()))?;

        // Content-Length may be absent or lie once decompression kicks in.
        if body_bytes.len() as u64 > MAX_BODY_SIZE {
            return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
        }

        debug!(
            final_url = %final_url,
            status = status.as_u16(),
            bytes = body_bytes.len(),
            "fetched page"
        );

        Ok(process_response(
            final_url,
            status,
            content_type.as_deref(),
            body_bytes,
        ))
    }
}
