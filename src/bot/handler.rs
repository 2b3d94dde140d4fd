use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::bot::{InboundMessage, PhotoRef, ReplySink, deliver};
use crate::config::LinkPolicy;
use crate::extractor::{self, metadata};
use crate::fetcher::PageSource;
use crate::links::{UrlResolver, extract_links, is_ecommerce, is_meesho};
use crate::reply::{EXTRACTION_FAILED, NO_TITLE, Reply, UNSUPPORTED_LINK, build_response};

/// Turns one inbound message into one reply per link.
///
/// Holds no per-message state; a single handler serves every message.
#[derive(Clone)]
pub struct MessageHandler {
    resolver: UrlResolver,
    source: Arc<dyn PageSource>,
    policy: Arc<LinkPolicy>,
}

impl MessageHandler {
    pub fn new(source: Arc<dyn PageSource>, policy: Arc<LinkPolicy>) -> Self {
        Self {
            resolver: UrlResolver::new(source.clone(), policy.clone()),
            source,
            policy,
        }
    }

    /// Reply to `message` through `sink`.
    ///
    /// Links are processed one after another. Every failure is turned into a
    /// user-facing reply for that link and processing moves on.
    #[instrument(skip_all, fields(links = tracing::field::Empty))]
    pub async fn handle(&self, message: &InboundMessage, sink: &dyn ReplySink) {
        let text = message.body();
        let photo = message.reply_photo();

        // Collected up front: the regex iterator is not held across awaits.
        let links: Vec<&str> = extract_links(text).collect();
        tracing::Span::current().record("links", links.len());

        if links.is_empty() {
            let reply = match photo {
                Some(photo) => Reply::photo(photo.clone(), NO_TITLE),
                None => Reply::text(UNSUPPORTED_LINK),
            };
            deliver(sink, &reply).await;
            return;
        }

        for link in links {
            let reply = self.process_link(link, text, photo).await;
            deliver(sink, &reply).await;
        }
    }

    /// Build the reply for a single candidate link.
    #[instrument(skip(self, message_text, photo))]
    pub async fn process_link(
        &self,
        candidate: &str,
        message_text: &str,
        photo: Option<&PhotoRef>,
    ) -> Reply {
        let link = match self.resolver.resolve(candidate).await {
            Ok(link) => link,
            Err(e) => {
                error!(error = %e, "could not resolve link");
                return Reply::text(EXTRACTION_FAILED);
            }
        };
        info!(url = %link, "resolved link");

        if !is_ecommerce(&self.policy, link.url()) {
            warn!(host = %link.host(), "not a supported marketplace");
            return Reply::text(UNSUPPORTED_LINK);
        }

        let page = match self.source.get(link.url()).await {
            Ok(page) => page,
            Err(e) => {
                error!(url = %link, error = %e, "error fetching page");
                return Reply::text(EXTRACTION_FAILED);
            }
        };

        let product = extractor::extract(&page, &link, message_text, &self.policy);
        info!(title = %product.title, price = ?product.price, "extracted product");

        let metadata = is_meesho(&self.policy, link.url()).then(|| metadata::detect(message_text));
        let body = build_response(&product, &link, metadata.as_ref());

        Reply::with_optional_photo(body, photo)
    }
}
