//! Telegram long-polling loop.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::bot::InboundMessage;
use crate::telegram::TelegramApi;
use crate::telegram::types::GetUpdatesParams;

const LONG_POLL_SECS: i64 = 30;
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// An inbound message plus where to reply.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub chat_id: i64,
    pub message_id: i64,
    pub message: InboundMessage,
}

/// Poll for updates and forward every actionable message.
///
/// Exits when `cancel` fires or `sender` is closed. Only receives; all
/// processing happens on the other side of the channel.
pub async fn run_polling_loop(
    api: &TelegramApi,
    sender: mpsc::Sender<Envelope>,
    cancel: CancellationToken,
) {
    let mut offset: Option<i64> = None;
    let mut backoff = Duration::from_secs(1);

    info!("Telegram polling loop started");

    loop {
        if cancel.is_cancelled() {
            break;
        }

        let params = GetUpdatesParams {
            offset,
            timeout: Some(LONG_POLL_SECS),
            allowed_updates: Some(vec!["message".into()]),
        };

        let updates = tokio::select! {
            _ = cancel.cancelled() => break,
            result = api.get_updates(&params) => result,
        };

        match updates {
            Ok(updates) => {
                backoff = Duration::from_secs(1);

                for update in updates {
                    offset = Some(update.update_id + 1);

                    let Some(msg) = update.message else {
                        continue;
                    };
                    if !msg.is_actionable() {
                        continue;
                    }

                    let envelope = Envelope {
                        chat_id: msg.chat.id,
                        message_id: msg.message_id,
                        message: msg.to_inbound(),
                    };

                    debug!(
                        update_id = update.update_id,
                        chat_id = envelope.chat_id,
                        "Forwarding Telegram message"
                    );

                    if sender.send(envelope).await.is_err() {
                        info!("Inbound channel closed, stopping polling");
                        return;
                    }
                }
            }
            Err(e) => {
                warn!(backoff_secs = backoff.as_secs(), "getUpdates error: {e:#}");

                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(backoff) => {},
                }

                backoff = (backoff * 2).min(MAX_BACKOFF);
            }
        }
    }

    info!("Telegram polling loop stopped");
}
