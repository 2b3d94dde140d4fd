//! Telegram Bot API HTTP client.

use std::time::Duration;

use anyhow::{Context, bail};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::telegram::types::{
    ApiResponse, BotInfo, GetUpdatesParams, SendMessageParams, SendPhotoParams, TgMessage, Update,
};

/// Long polls hold the connection for up to 30 s; leave headroom.
const API_TIMEOUT: Duration = Duration::from_secs(60);

pub struct TelegramApi {
    client: Client,
    base_url: String,
}

impl TelegramApi {
    /// `api_url` is the API root, e.g. `https://api.telegram.org`.
    pub fn new(api_url: &str, bot_token: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(API_TIMEOUT)
            .build()
            .context("failed to build telegram http client")?;
        Ok(Self {
            client,
            base_url: format!("{}/bot{bot_token}", api_url.trim_end_matches('/')),
        })
    }

    /// Verify the bot token.
    pub async fn get_me(&self) -> anyhow::Result<BotInfo> {
        let resp: ApiResponse<BotInfo> = self
            .client
            .get(format!("{}/getMe", self.base_url))
            .send()
            .await
            .context("getMe request failed")?
            .json()
            .await
            .context("getMe response parse failed")?;

        if !resp.ok {
            bail!(
                "getMe failed: {}",
                resp.description.unwrap_or_else(|| "unknown error".into())
            );
        }
        resp.result.context("getMe returned no result")
    }

    /// Long-poll for updates.
    pub async fn get_updates(&self, params: &GetUpdatesParams) -> anyhow::Result<Vec<Update>> {
        let updates: Option<Vec<Update>> = self.call_optional("getUpdates", params).await?;
        Ok(updates.unwrap_or_default())
    }

    pub async fn send_message(&self, params: &SendMessageParams) -> anyhow::Result<TgMessage> {
        self.call("sendMessage", params).await
    }

    /// Send a photo by `file_id` with an optional caption.
    pub async fn send_photo(&self, params: &SendPhotoParams) -> anyhow::Result<TgMessage> {
        self.call("sendPhoto", params).await
    }

    async fn call<P, T>(&self, method: &str, params: &P) -> anyhow::Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call_optional(method, params)
            .await?
            .with_context(|| format!("{method} returned no result"))
    }

    async fn call_optional<P, T>(&self, method: &str, params: &P) -> anyhow::Result<Option<T>>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp: ApiResponse<T> = self
            .client
            .post(format!("{}/{method}", self.base_url))
            .json(params)
            .send()
            .await
            .with_context(|| format!("{method} request failed"))?
            .json()
            .await
            .with_context(|| format!("{method} response parse failed"))?;

        if !resp.ok {
            bail!(
                "{method} failed: {}",
                resp.description.unwrap_or_else(|| "unknown error".into())
            );
        }
        Ok(resp.result)
    }
}
