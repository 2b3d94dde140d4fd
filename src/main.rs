use std::sync::Arc;

use anyhow::Result;
use dealbot::{
    bot::{BotSupervisor, MessageHandler, SupervisorConfig},
    config::{Config, LinkPolicy},
    fetcher::{HttpFetcher, PageSource},
    telegram::TelegramApi,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    info!(?config, "configuration loaded");

    let policy = Arc::new(LinkPolicy::default());
    let fetcher: Arc<dyn PageSource> = Arc::new(HttpFetcher::new(&config)?);
    let handler = MessageHandler::new(fetcher, policy);

    let api = Arc::new(TelegramApi::new(
        config.telegram_api_url(),
        config.bot_token(),
    )?);
    let me = api.get_me().await?;
    info!(bot_id = me.id, username = ?me.username, "connected to Telegram");

    let supervisor = BotSupervisor::new(
        api,
        handler,
        SupervisorConfig {
            concurrency: config.worker_concurrency(),
        },
    );
    supervisor.run().await
}

/// `RUST_LOG` filters (default `info`); `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
