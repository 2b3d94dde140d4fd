use async_trait::async_trait;
use url::Url;

use crate::fetcher::{errors::FetchError, types::PageResponse};

/// Anything that can GET a URL, following redirects.
///
/// Both redirect resolution and page fetching go through this seam so the
/// pipeline can run against an in-memory source.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn get(&self, url: &Url) -> Result<PageResponse, FetchError>;
}
