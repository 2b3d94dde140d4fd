use async_trait::async_trait;
use tracing::error;

use crate::bot::PhotoRef;
use crate::reply::Reply;

/// The two reply primitives a transport must offer. Text is always sent
/// without any markup parsing.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send_text(&self, text: &str) -> anyhow::Result<()>;

    async fn send_photo(&self, photo: &PhotoRef, caption: &str) -> anyhow::Result<()>;
}

/// Send `reply` through `sink`. Failures are logged, not returned: one
/// undeliverable reply must not stop the rest of the message.
pub async fn deliver(sink: &dyn ReplySink, reply: &Reply) {
    let result = match reply.attached_photo() {
        Some(photo) => sink.send_photo(photo, reply.body()).await,
        None => sink.send_text(reply.body()).await,
    };

    if let Err(e) = result {
        error!(error = %e, "failed to send reply");
    }
}
