use std::sync::Arc;

use async_trait::async_trait;

use crate::bot::{PhotoRef, ReplySink};
use crate::telegram::TelegramApi;
use crate::telegram::types::{SendMessageParams, SendPhotoParams};

/// Replies into one Telegram chat.
#[derive(Clone)]
pub struct TelegramSink {
    api: Arc<TelegramApi>,
    chat_id: i64,
}

impl TelegramSink {
    pub fn new(api: Arc<TelegramApi>, chat_id: i64) -> Self {
        Self { api, chat_id }
    }
}

#[async_trait]
impl ReplySink for TelegramSink {
    async fn send_text(&self, text: &str) -> anyhow::Result<()> {
        self.api
            .send_message(&SendMessageParams {
                chat_id: self.chat_id,
                text: text.to_string(),
                parse_mode: None,
                disable_web_page_preview: None,
            })
            .await?;
        Ok(())
    }

    async fn send_photo(&self, photo: &PhotoRef, caption: &str) -> anyhow::Result<()> {
        self.api
            .send_photo(&SendPhotoParams {
                chat_id: self.chat_id,
                photo: photo.as_str().to_string(),
                caption: Some(caption.to_string()),
                parse_mode: None,
            })
            .await?;
        Ok(())
    }
}
