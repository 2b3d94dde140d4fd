use crate::bot::MessageHandler;
use crate::telegram::{Envelope, TelegramApi, TelegramSink, run_polling_loop};
use anyhow::Result;
use std::sync::Arc;
use tokio::{
    signal,
    sync::{Semaphore, mpsc},
};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, error, info, info_span};

/// Supervisor configuration
#[derive(Clone)]
pub struct SupervisorConfig {
    /// Messages processed at the same time.
    pub concurrency: usize,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self { concurrency: 4 }
    }
}

/// Receives messages on one task and processes each on its own task, so a
/// slow product page never delays receipt of the next message.
pub struct BotSupervisor {
    api: Arc<TelegramApi>,
    handler: Arc<MessageHandler>,
    config: SupervisorConfig,
    shutdown_token: CancellationToken,
}

impl BotSupervisor {
    pub fn new(api: Arc<TelegramApi>, handler: MessageHandler, config: SupervisorConfig) -> Self {
        Self {
            api,
            handler: Arc::new(handler),
            config,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Token that stops the supervisor when cancelled.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// Run until Ctrl-C (or the shutdown token), then drain in-flight messages.
    pub async fn run(self) -> Result<()> {
        let concurrency = self.config.concurrency.max(1);
        info!(concurrency, "Starting bot supervisor");

        let (sender, receiver) = mpsc::channel(concurrency * 2);
        let semaphore = Arc::new(Semaphore::new(concurrency));

        // Spawn shutdown handler
        let shutdown_token = self.shutdown_token.clone();
        tokio::spawn(async move {
            if let Err(e) = signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
                return;
            }
            info!("Received shutdown signal, initiating graceful shutdown...");
            shutdown_token.cancel();
        });

        let poller_handle = {
            let api = self.api.clone();
            let shutdown_token = self.shutdown_token.clone();
            tokio::spawn(
                async move { run_polling_loop(&api, sender, shutdown_token).await }
                    .instrument(info_span!("poller")),
            )
        };

        let processor_handle = tokio::spawn(
            Self::run_processor(
                self.api.clone(),
                self.handler.clone(),
                receiver,
                semaphore.clone(),
                self.shutdown_token.clone(),
            )
            .instrument(info_span!("processor")),
        );

        self.shutdown_token.cancelled().await;
        info!("Shutdown initiated, waiting for in-flight messages...");

        // The processor must stop taking permits before the drain below.
        match processor_handle.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!(error = %e, "processor failed"),
            Err(e) => error!(error = %e, "processor task panicked"),
        }

        // Every permit back means every message task has finished.
        let _permits = semaphore.acquire_many(concurrency as u32).await?;
        info!("All messages handled, shutting down");

        if let Err(e) = poller_handle.await {
            error!(error = %e, "poller task panicked");
        }

        Ok(())
    }

    async fn run_processor(
        api: Arc<TelegramApi>,
        handler: Arc<MessageHandler>,
        mut receiver: mpsc::Receiver<Envelope>,
        semaphore: Arc<Semaphore>,
        shutdown_token: CancellationToken,
    ) -> Result<()> {
        loop {
            let envelope = tokio::select! {
                biased;
                _ = shutdown_token.cancelled() => break,
                envelope = receiver.recv() => match envelope {
                    Some(envelope) => envelope,
                    None => break,
                },
            };

            // Messages not yet started when shutdown begins are dropped.
            let permit = tokio::select! {
                biased;
                _ = shutdown_token.cancelled() => break,
                permit = semaphore.clone().acquire_owned() => permit?,
            };
            let handler = handler.clone();
            let sink = TelegramSink::new(api.clone(), envelope.chat_id);

            let chat_id = envelope.chat_id;
            let message_id = envelope.message_id;

            tokio::spawn(
                async move {
                    let _permit = permit; // Hold permit until the message is handled
                    handler.handle(&envelope.message, &sink).await;
                }
                .instrument(info_span!("message", chat_id, message_id)),
            );
        }

        info!("Processor shutting down");
        Ok(())
    }
}
