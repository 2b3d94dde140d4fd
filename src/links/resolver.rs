use std::fmt::{Display, Formatter};
use std::sync::Arc;

use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::LinkPolicy;
use crate::fetcher::PageSource;
use crate::links::errors::ResolveError;

/// A link after redirect resolution and cleaning.
///
/// Always `https`, with tracking parameters removed. Cleaning an already
/// resolved link yields the same link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink(Url);

impl ResolvedLink {
    pub fn url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Host, lowercased. Empty for host-less URLs.
    pub fn host(&self) -> String {
        self.0.host_str().unwrap_or_default().to_ascii_lowercase()
    }

    pub fn into_url(self) -> Url {
        self.0
    }
}

impl Display for ResolvedLink {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Follows shortener redirects and cleans the destination.
#[derive(Clone)]
pub struct UrlResolver {
    source: Arc<dyn PageSource>,
    policy: Arc<LinkPolicy>,
}

impl UrlResolver {
    pub fn new(source: Arc<dyn PageSource>, policy: Arc<LinkPolicy>) -> Self {
        Self { source, policy }
    }

    /// Resolve `raw` to its final destination and clean it.
    ///
    /// Network failures are not errors here: the original link is cleaned
    /// instead. Only a candidate that does not parse as a URL fails.
    #[instrument(skip(self), fields(url = %raw))]
    pub async fn resolve(&self, raw: &str) -> Result<ResolvedLink, ResolveError> {
        let original = Url::parse(raw)?;

        let destination = match self.source.get(&original).await {
            Ok(page) => {
                if page.url_final != original {
                    debug!(destination = %page.url_final, "followed redirects");
                }
                page.url_final
            }
            Err(e) => {
                warn!(error = %e, "redirect resolution failed, cleaning original link");
                original
            }
        };

        Ok(clean_url(destination, &self.policy))
    }
}

/// Strip tracking parameters and force `https`.
///
/// Only the query and scheme change; path and fragment are preserved.
pub fn clean_url(mut url: Url, policy: &LinkPolicy) -> ResolvedLink {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();

    if url.query().is_some() {
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| policy.keeps_param(&host, key))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        if kept.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(kept.iter());
        }
    }

    ResolvedLink(force_https(url))
}

fn force_https(mut url: Url) -> Url {
    if url.scheme() == "https" || url.set_scheme("https").is_ok() {
        return url;
    }

    // set_scheme refuses some transitions; fall back to rewriting the prefix.
    let rewritten = url
        .as_str()
        .strip_prefix("http://")
        .map(|rest| format!("https://{rest}"));
    rewritten
        .and_then(|s| Url::parse(&s).ok())
        .unwrap_or(url)
}
